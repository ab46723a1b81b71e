pub mod ai_output;
pub mod validation;
pub mod skin_analysis;
pub mod medicine_analysis;
pub mod doctor_search;
pub mod support_chat;
