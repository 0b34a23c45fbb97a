#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::NaiveDate;
use school_registry::{
    association::{AssociationUpdate, StudentTeacher},
    entities::{
        person::{Discriminator, Gender, Person, PersonDetails, PersonId},
        student::{Student, StudentRequest},
        teacher::TeacherRequest,
    },
    errors::AppError,
    kind::{PersonKind, StudentKind},
    repositories::person::{HealthRepository, PersonRepository, StudentRepository},
};

#[derive(Default)]
struct State {
    next_id: PersonId,
    people: BTreeMap<PersonId, Person>,
    links: Vec<StudentTeacher>,
}

/// Store double that keeps people and links in memory, mirroring the
/// semantics of the Postgres repository.
#[derive(Clone)]
pub struct InMemoryRepo {
    state: Arc<Mutex<State>>,
    healthy: Arc<AtomicBool>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        InMemoryRepo {
            state: Arc::new(Mutex::new(State {
                next_id: 1,
                ..State::default()
            })),
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// Every stored link row, in insertion order.
    pub fn links(&self) -> Vec<StudentTeacher> {
        self.state.lock().unwrap().links.clone()
    }

    pub fn person_count(&self) -> usize {
        self.state.lock().unwrap().people.len()
    }

    fn owner_of(link: &StudentTeacher, owner: Discriminator) -> PersonId {
        link.counterpart_of(owner.counterpart())
    }

    fn replace_links(state: &mut State, owner: Discriminator, owner_id: PersonId, links: &AssociationUpdate) {
        if let Some(rows) = links.rows_for(owner, owner_id) {
            state
                .links
                .retain(|link| Self::owner_of(link, owner) != owner_id);
            state.links.extend(rows);
        }
    }
}

#[async_trait]
impl<K: PersonKind> PersonRepository<K> for InMemoryRepo {
    async fn insert_person(&self, entity: &K::Entity, links: &AssociationUpdate) -> Result<PersonId, AppError> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;

        let stored = K::with_id(entity.clone(), id);
        state.people.insert(id, K::into_person(stored));
        Self::replace_links(&mut state, K::DISCRIMINATOR, id, links);
        Ok(id)
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<K::Entity>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.people.get(&id).cloned().and_then(K::from_person))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<K::Entity>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .people
            .values()
            .cloned()
            .filter_map(K::from_person)
            .find(|entity| K::name(entity) == name))
    }

    async fn list_all(&self) -> Result<Vec<K::Entity>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.people.values().cloned().filter_map(K::from_person).collect())
    }

    async fn update_person(&self, entity: &K::Entity, links: &AssociationUpdate) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        let id = K::id(entity);

        match state.people.get(&id) {
            Some(existing) if existing.discriminator() == K::DISCRIMINATOR => {}
            _ => return Ok(false),
        }

        state.people.insert(id, K::into_person(entity.clone()));
        Self::replace_links(&mut state, K::DISCRIMINATOR, id, links);
        Ok(true)
    }

    async fn delete_person(&self, id: PersonId) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();

        match state.people.get(&id) {
            Some(existing) if existing.discriminator() == K::DISCRIMINATOR => {}
            _ => return Ok(false),
        }

        state.people.remove(&id);
        state
            .links
            .retain(|link| link.student_id != id && link.teacher_id != id);
        Ok(true)
    }

    async fn find_links(&self, id: PersonId) -> Result<Vec<StudentTeacher>, AppError> {
        let state = self.state.lock().unwrap();
        let mut links: Vec<StudentTeacher> = state
            .links
            .iter()
            .copied()
            .filter(|link| Self::owner_of(link, K::DISCRIMINATOR) == id)
            .collect();
        links.sort_by_key(|link| (link.student_id, link.teacher_id));
        Ok(links)
    }

    async fn missing_counterparts(&self, ids: &[PersonId]) -> Result<Vec<PersonId>, AppError> {
        let state = self.state.lock().unwrap();
        let counterpart = K::DISCRIMINATOR.counterpart();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| {
                state
                    .people
                    .get(id)
                    .map(|person| person.discriminator() != counterpart)
                    .unwrap_or(true)
            })
            .collect())
    }
}

#[async_trait]
impl StudentRepository for InMemoryRepo {
    async fn find_by_teacher_name(&self, fragment: &str) -> Result<Vec<Student>, AppError> {
        let state = self.state.lock().unwrap();

        let teacher_ids: Vec<PersonId> = state
            .people
            .values()
            .filter(|person| {
                person.discriminator() == Discriminator::Teacher
                    && person.details().name.contains(fragment)
            })
            .map(Person::id)
            .collect();

        Ok(state
            .people
            .values()
            .cloned()
            .filter_map(StudentKind::from_person)
            .filter(|student| {
                state
                    .links
                    .iter()
                    .any(|link| link.student_id == student.id && teacher_ids.contains(&link.teacher_id))
            })
            .collect())
    }
}

#[async_trait]
impl HealthRepository for InMemoryRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::InternalError("connection refused".to_string()))
        }
    }
}

// ───── Request builders ──────────────────────────────────────────────

pub fn details(name: &str) -> PersonDetails {
    PersonDetails {
        name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2008, 3, 14).unwrap(),
        pin: "0843141234".to_string(),
        sex: Gender::Female,
        email: "maria.petrova@school.bg".to_string(),
    }
}

pub fn student_request(name: &str, gpa: f32) -> StudentRequest {
    StudentRequest {
        details: details(name),
        major: "Mathematics".to_string(),
        gpa,
        teacher_ids: None,
    }
}

pub fn teacher_request(name: &str) -> TeacherRequest {
    TeacherRequest {
        details: PersonDetails {
            date_of_birth: NaiveDate::from_ymd_opt(1975, 11, 2).unwrap(),
            sex: Gender::Male,
            email: "ivan.dimitrov@school.bg".to_string(),
            ..details(name)
        },
        subject: "Physics".to_string(),
        experience: 12.5,
        student_ids: None,
    }
}
