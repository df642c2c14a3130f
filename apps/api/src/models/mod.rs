pub mod company;
pub mod document;
pub mod employee;
