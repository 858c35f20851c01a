pub mod booking;
pub mod catalog;
pub mod inquiry;
pub mod quote;
pub mod schedule;

pub use booking::{Booking, BookingDraft, BookingStatus};
pub use catalog::{AddOn, Catalog, CatalogKind, ServicePackage, Testimonial};
pub use inquiry::{Attachment, Inquiry, InquiryDraft, InquiryStatus};
pub use quote::Quote;
pub use schedule::{SchedulePolicy, TimeSlot};
