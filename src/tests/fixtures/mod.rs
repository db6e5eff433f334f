pub mod clients;
pub mod principals;
pub mod sample_persons;
pub mod users;
