//! The per-kind capability set the generic person service is built on.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    derivation::{gpa_status, year_of_study},
    entities::{
        person::{Discriminator, Person, PersonDetails, PersonId, PersonInsert},
        student::{Student, StudentRequest},
        teacher::{Teacher, TeacherRequest},
    },
    errors::AppError,
};

/// Everything the person service needs to know about one concrete kind of person:
/// how to read its request, derive its computed fields, and move it in and out
/// of the shared `person` table.
pub trait PersonKind: Send + Sync + 'static {
    type Entity: Clone + Serialize + Send + Sync + 'static;
    type Request: Send + Sync + 'static;

    const DISCRIMINATOR: Discriminator;

    fn details(request: &Self::Request) -> &PersonDetails;

    /// Kind-specific violations, reported after the shared person rules.
    fn extra_violations(_request: &Self::Request) -> Vec<String> {
        Vec::new()
    }

    fn counterpart_ids(request: &Self::Request) -> Option<&[PersonId]>;

    /// Builds a not-yet-stored entity (id 0) with every derived field filled in.
    fn create_entity(request: &Self::Request, today: NaiveDate) -> Result<Self::Entity, AppError>;

    /// Overwrites the copied fields of `entity` and re-runs the derivations that
    /// apply on update. Must not touch `entity` when it fails.
    fn apply_update(entity: &mut Self::Entity, request: &Self::Request) -> Result<(), AppError>;

    fn id(entity: &Self::Entity) -> PersonId;

    fn with_id(entity: Self::Entity, id: PersonId) -> Self::Entity;

    fn name(entity: &Self::Entity) -> &str;

    fn to_insert(entity: &Self::Entity) -> PersonInsert;

    fn from_person(person: Person) -> Option<Self::Entity>;

    fn into_person(entity: Self::Entity) -> Person;

    fn label() -> &'static str {
        Self::DISCRIMINATOR.as_str()
    }
}

pub struct StudentKind;

pub struct TeacherKind;

impl PersonKind for StudentKind {
    type Entity = Student;
    type Request = StudentRequest;

    const DISCRIMINATOR: Discriminator = Discriminator::Student;

    fn details(request: &StudentRequest) -> &PersonDetails {
        &request.details
    }

    fn counterpart_ids(request: &StudentRequest) -> Option<&[PersonId]> {
        request.teacher_ids.as_deref()
    }

    fn create_entity(request: &StudentRequest, today: NaiveDate) -> Result<Student, AppError> {
        Ok(Student {
            id: 0,
            details: request.details.clone(),
            major: request.major.clone(),
            year_of_study: year_of_study(request.details.date_of_birth, today),
            gpa: request.gpa,
            gpa_status: gpa_status(request.gpa)?,
        })
    }

    // year_of_study is fixed at creation
    fn apply_update(student: &mut Student, request: &StudentRequest) -> Result<(), AppError> {
        let status = gpa_status(request.gpa)?;

        student.details = request.details.clone();
        student.major = request.major.clone();
        student.gpa = request.gpa;
        student.gpa_status = status;
        Ok(())
    }

    fn id(student: &Student) -> PersonId {
        student.id
    }

    fn with_id(student: Student, id: PersonId) -> Student {
        Student { id, ..student }
    }

    fn name(student: &Student) -> &str {
        &student.details.name
    }

    fn to_insert(student: &Student) -> PersonInsert {
        PersonInsert::from(student)
    }

    fn from_person(person: Person) -> Option<Student> {
        match person {
            Person::Student(student) => Some(student),
            Person::Teacher(_) => None,
        }
    }

    fn into_person(student: Student) -> Person {
        Person::Student(student)
    }
}

impl PersonKind for TeacherKind {
    type Entity = Teacher;
    type Request = TeacherRequest;

    const DISCRIMINATOR: Discriminator = Discriminator::Teacher;

    fn details(request: &TeacherRequest) -> &PersonDetails {
        &request.details
    }

    fn extra_violations(request: &TeacherRequest) -> Vec<String> {
        if request.experience < 0.0 || request.experience.is_nan() {
            vec!["Experience cannot be negative.".to_string()]
        } else {
            Vec::new()
        }
    }

    fn counterpart_ids(request: &TeacherRequest) -> Option<&[PersonId]> {
        request.student_ids.as_deref()
    }

    fn create_entity(request: &TeacherRequest, _today: NaiveDate) -> Result<Teacher, AppError> {
        Ok(Teacher {
            id: 0,
            details: request.details.clone(),
            subject: request.subject.clone(),
            experience: request.experience,
        })
    }

    fn apply_update(teacher: &mut Teacher, request: &TeacherRequest) -> Result<(), AppError> {
        teacher.details = request.details.clone();
        teacher.subject = request.subject.clone();
        teacher.experience = request.experience;
        Ok(())
    }

    fn id(teacher: &Teacher) -> PersonId {
        teacher.id
    }

    fn with_id(teacher: Teacher, id: PersonId) -> Teacher {
        Teacher { id, ..teacher }
    }

    fn name(teacher: &Teacher) -> &str {
        &teacher.details.name
    }

    fn to_insert(teacher: &Teacher) -> PersonInsert {
        PersonInsert::from(teacher)
    }

    fn from_person(person: Person) -> Option<Teacher> {
        match person {
            Person::Teacher(teacher) => Some(teacher),
            Person::Student(_) => None,
        }
    }

    fn into_person(teacher: Teacher) -> Person {
        Person::Teacher(teacher)
    }
}
