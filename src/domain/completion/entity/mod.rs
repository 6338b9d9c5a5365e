pub mod completed_survey;
pub mod question_answer;
