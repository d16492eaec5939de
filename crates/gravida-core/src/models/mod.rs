pub mod biometry;
pub mod calculation;
pub mod risk;
pub mod triage;
