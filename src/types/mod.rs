pub mod analyst;
pub mod interview;

pub use analyst::{Analyst, Perspectives};
pub use interview::{InterviewOutcome, InterviewRequest, Transcript, Turn, TurnRole};

#[cfg(test)]
mod tests;
