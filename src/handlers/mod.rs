pub mod catalog;
pub mod drafts;
pub mod health;
pub mod inquiries;
pub mod quote;
pub mod slots;
