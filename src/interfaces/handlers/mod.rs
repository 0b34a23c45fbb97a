pub mod home;
pub mod results;
pub mod students;
pub mod system;
pub mod teachers;
