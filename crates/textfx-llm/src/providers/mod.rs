pub mod palm;
