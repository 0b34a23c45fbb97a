mod test_utils;

use school_registry::{
    association::StudentTeacher,
    errors::AppError,
    use_cases::person::{StudentHandler, TeacherHandler},
};
use test_utils::{student_request, teacher_request, InMemoryRepo};

fn handlers() -> (InMemoryRepo, StudentHandler<InMemoryRepo>, TeacherHandler<InMemoryRepo>) {
    let repo = InMemoryRepo::new();
    (
        repo.clone(),
        StudentHandler::new(repo.clone()),
        TeacherHandler::new(repo),
    )
}

#[actix_rt::test]
async fn create_then_get_round_trips_every_field() {
    let (_, _, teachers) = handlers();
    let request = teacher_request("Ivan Dimitrov");

    let response = teachers.create(request.clone()).await.unwrap();
    assert!(response.success);
    assert_eq!(response.message, "Teacher successfully created.");

    let stored = teachers.get_by_id(response.id.unwrap()).await.unwrap();
    assert_eq!(stored.details, request.details);
    assert_eq!(stored.subject, "Physics");
    assert_eq!(stored.experience, 12.5);
}

#[actix_rt::test]
async fn teacher_links_populate_both_keys() {
    let (repo, students, teachers) = handlers();
    let maria = students.create(student_request("Maria Petrova", 4.0)).await.unwrap().id.unwrap();
    let elena = students.create(student_request("Elena Georgieva", 5.0)).await.unwrap().id.unwrap();

    let mut request = teacher_request("Ivan Dimitrov");
    request.student_ids = Some(vec![maria, elena]);
    let teacher = teachers.create(request).await.unwrap().id.unwrap();

    assert_eq!(
        repo.links(),
        vec![
            StudentTeacher { student_id: maria, teacher_id: teacher },
            StudentTeacher { student_id: elena, teacher_id: teacher },
        ]
    );
    assert_eq!(teachers.linked_ids(teacher).await.unwrap(), vec![maria, elena]);
    assert_eq!(students.linked_ids(maria).await.unwrap(), vec![teacher]);

    let found = students.students_by_teacher_name(Some("Dimitrov")).await.unwrap();
    assert_eq!(found.len(), 2);
}

#[actix_rt::test]
async fn unknown_student_ids_are_rejected() {
    let (_, _, teachers) = handlers();

    let mut request = teacher_request("Ivan Dimitrov");
    request.student_ids = Some(vec![3]);
    let response = teachers.create(request).await.unwrap();

    assert!(!response.success);
    assert_eq!(response.message, "Unknown student IDs: 3.");
    assert!(teachers.list_all().await.is_err());
}

#[actix_rt::test]
async fn negative_experience_is_reported_after_person_rules() {
    let (_, _, teachers) = handlers();
    let mut request = teacher_request("Ivan Dimitrov");
    request.details.pin = "abc".to_string();
    request.experience = -2.0;

    let response = teachers.create(request).await.unwrap();

    assert!(!response.success);
    assert_eq!(
        response.message,
        "PIN must consist of exactly 10 digits.\nExperience cannot be negative."
    );
}

#[actix_rt::test]
async fn reads_on_empty_store_are_not_found() {
    let (_, _, teachers) = handlers();

    let err = teachers.get_by_id(3).await.unwrap_err();
    assert_eq!(err.to_string(), "Teacher with ID: 3 does not exist.");

    let err = teachers.get_by_name("Ivan Dimitrov").await.unwrap_err();
    assert_eq!(err.to_string(), "Teacher with name: Ivan Dimitrov does not exist.");

    let err = teachers.list_all().await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "No teachers found in the database."));
}

#[actix_rt::test]
async fn student_ids_are_invisible_to_the_teacher_service() {
    let (_, students, teachers) = handlers();
    let student = students.create(student_request("Maria Petrova", 4.0)).await.unwrap().id.unwrap();

    assert!(matches!(teachers.get_by_id(student).await, Err(AppError::NotFound(_))));
    assert!(teachers.get_by_name("Maria Petrova").await.is_err());
}

#[actix_rt::test]
async fn update_replaces_fields_and_links() {
    let (_, students, teachers) = handlers();
    let maria = students.create(student_request("Maria Petrova", 4.0)).await.unwrap().id.unwrap();
    let elena = students.create(student_request("Elena Georgieva", 4.0)).await.unwrap().id.unwrap();

    let mut request = teacher_request("Ivan Dimitrov");
    request.student_ids = Some(vec![maria]);
    let id = teachers.create(request).await.unwrap().id.unwrap();

    let mut request = teacher_request("Ivan Dimitrov");
    request.subject = "Astronomy".to_string();
    request.experience = 13.0;
    request.student_ids = Some(vec![elena]);
    let response = teachers.update(id, request).await.unwrap();
    assert!(response.success);
    assert_eq!(response.message, "Teacher updated successfully.");

    let stored = teachers.get_by_id(id).await.unwrap();
    assert_eq!(stored.subject, "Astronomy");
    assert_eq!(stored.experience, 13.0);
    assert_eq!(teachers.linked_ids(id).await.unwrap(), vec![elena]);
    assert!(students.linked_ids(maria).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn update_and_delete_missing_teacher_are_failed_results() {
    let (_, _, teachers) = handlers();

    let response = teachers.update(8, teacher_request("Ivan Dimitrov")).await.unwrap();
    assert!(!response.success);
    assert_eq!(response.message, "Teacher not found.");

    let response = teachers.delete(8).await.unwrap();
    assert!(!response.success);
    assert_eq!(response.message, "Teacher not found.");
}

#[actix_rt::test]
async fn deleting_a_teacher_drops_its_links() {
    let (repo, students, teachers) = handlers();
    let teacher = teachers.create(teacher_request("Ivan Dimitrov")).await.unwrap().id.unwrap();
    let mut request = student_request("Maria Petrova", 4.0);
    request.teacher_ids = Some(vec![teacher]);
    let student = students.create(request).await.unwrap().id.unwrap();

    let response = teachers.delete(teacher).await.unwrap();
    assert!(response.success);
    assert_eq!(response.message, "Teacher deleted successfully.");

    assert!(repo.links().is_empty());
    assert!(students.linked_ids(student).await.unwrap().is_empty());
}
