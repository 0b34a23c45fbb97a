use std::marker::PhantomData;

use chrono::Local;

use crate::{
    association::AssociationUpdate,
    entities::{
        person::PersonId,
        response::GeneralResponse,
        student::Student,
    },
    errors::AppError,
    kind::{PersonKind, StudentKind, TeacherKind},
    repositories::person::{PersonRepository, StudentRepository},
    validation::{join_violations, validate_person},
};

/// Create/read/update/delete for one kind of person, plus replacement of its links.
pub struct PersonHandler<R, K>
where
    R: PersonRepository<K>,
    K: PersonKind,
{
    pub person_repo: R,
    _kind: PhantomData<K>,
}

pub type StudentHandler<R> = PersonHandler<R, StudentKind>;
pub type TeacherHandler<R> = PersonHandler<R, TeacherKind>;

impl<R, K> PersonHandler<R, K>
where
    R: PersonRepository<K>,
    K: PersonKind,
{
    pub fn new(person_repo: R) -> Self {
        PersonHandler {
            person_repo,
            _kind: PhantomData,
        }
    }

    fn not_found_message() -> String {
        format!("{} not found.", K::label())
    }

    /// Validation failure as a joined message, or `None` when the request is valid.
    fn violations(request: &K::Request) -> Option<String> {
        let mut violations = validate_person(K::details(request));
        violations.extend(K::extra_violations(request));

        if violations.is_empty() {
            None
        } else {
            Some(join_violations(&violations))
        }
    }

    /// Resolves the requested link change, failing when a counterpart id is unknown.
    async fn resolve_links(&self, request: &K::Request) -> Result<Result<AssociationUpdate, GeneralResponse>, AppError> {
        let links = AssociationUpdate::from_ids(K::counterpart_ids(request));

        let missing = self.person_repo.missing_counterparts(links.counterpart_ids()).await?;
        if !missing.is_empty() {
            let ids = missing
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Ok(Err(GeneralResponse::invalid(format!(
                "Unknown {} IDs: {}.",
                K::DISCRIMINATOR.counterpart().as_str().to_lowercase(),
                ids
            ))));
        }

        Ok(Ok(links))
    }

    /// Validates, derives, links and stores a new person
    pub async fn create(&self, request: K::Request) -> Result<GeneralResponse, AppError> {
        if let Some(message) = Self::violations(&request) {
            tracing::info!("Rejected {} creation: {}", K::label(), message.replace('\n', " "));
            return Ok(GeneralResponse::invalid(message));
        }

        let entity = K::create_entity(&request, Local::now().date_naive())?;

        let links = match self.resolve_links(&request).await? {
            Ok(links) => links,
            Err(response) => return Ok(response),
        };

        let id = self.person_repo.insert_person(&entity, &links).await?;

        tracing::info!("{} {} created", K::label(), id);
        Ok(GeneralResponse::created(id, format!("{} successfully created.", K::label())))
    }

    /// Retrieves a person by id
    pub async fn get_by_id(&self, id: PersonId) -> Result<K::Entity, AppError> {
        self.person_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("{} with ID: {} does not exist.", K::label(), id))
            })
    }

    /// Retrieves the first person whose name matches exactly
    pub async fn get_by_name(&self, name: &str) -> Result<K::Entity, AppError> {
        self.person_repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("{} with name: {} does not exist.", K::label(), name))
            })
    }

    /// Retrieves every person of this kind; an empty store is reported as NotFound.
    pub async fn list_all(&self) -> Result<Vec<K::Entity>, AppError> {
        let all = self.person_repo.list_all().await?;

        if all.is_empty() {
            return Err(AppError::NotFound(format!(
                "No {} found in the database.",
                K::DISCRIMINATOR.plural()
            )));
        }
        Ok(all)
    }

    /// Overwrites an existing person and replaces its links when ids are supplied
    pub async fn update(&self, id: PersonId, request: K::Request) -> Result<GeneralResponse, AppError> {
        if let Some(message) = Self::violations(&request) {
            tracing::info!("Rejected {} {} update: {}", K::label(), id, message.replace('\n', " "));
            return Ok(GeneralResponse::invalid(message));
        }

        let Some(mut entity) = self.person_repo.find_by_id(id).await? else {
            return Ok(GeneralResponse::not_found(Self::not_found_message()));
        };

        K::apply_update(&mut entity, &request)?;

        let links = match self.resolve_links(&request).await? {
            Ok(links) => links,
            Err(response) => return Ok(response),
        };

        // the row may have been deleted since it was loaded
        if !self.person_repo.update_person(&entity, &links).await? {
            return Ok(GeneralResponse::not_found(Self::not_found_message()));
        }

        tracing::info!("{} {} updated", K::label(), K::id(&entity));
        Ok(GeneralResponse::ok(format!("{} updated successfully.", K::label())))
    }

    /// Deletes a person by id
    pub async fn delete(&self, id: PersonId) -> Result<GeneralResponse, AppError> {
        if !self.person_repo.delete_person(id).await? {
            return Ok(GeneralResponse::not_found(Self::not_found_message()));
        }

        tracing::info!("{} {} deleted", K::label(), id);
        Ok(GeneralResponse::ok(format!("{} deleted successfully.", K::label())))
    }

    /// Ids on the other side of the person's links
    pub async fn linked_ids(&self, id: PersonId) -> Result<Vec<PersonId>, AppError> {
        let owner = self.get_by_id(id).await?;

        let links = self.person_repo.find_links(K::id(&owner)).await?;
        Ok(links
            .iter()
            .map(|link| link.counterpart_of(K::DISCRIMINATOR))
            .collect())
    }
}

impl<R> PersonHandler<R, StudentKind>
where
    R: StudentRepository,
{
    /// Students taught by a teacher whose name contains `name`; all students
    /// when the filter is absent or empty. Never NotFound.
    pub async fn students_by_teacher_name(&self, name: Option<&str>) -> Result<Vec<Student>, AppError> {
        match name {
            Some(fragment) if !fragment.is_empty() => {
                self.person_repo.find_by_teacher_name(fragment).await
            }
            _ => PersonRepository::<StudentKind>::list_all(&self.person_repo).await,
        }
    }
}
