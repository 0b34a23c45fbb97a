pub mod person;
pub mod response;
pub mod student;
pub mod teacher;
