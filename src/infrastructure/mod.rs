pub mod probers;
pub mod reporters;
