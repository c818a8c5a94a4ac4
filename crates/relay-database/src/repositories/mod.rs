//! Concrete repository implementations, one per collection.

pub mod application;
pub mod delivery;
pub mod group;
pub mod history;
pub mod notification;
pub mod recipient;
pub mod user;

pub use application::ApplicationRepository;
pub use delivery::DeliveryRepository;
pub use group::GroupRepository;
pub use history::EditHistoryRepository;
pub use notification::NotificationRepository;
pub use recipient::RecipientRepository;
pub use user::UserRepository;
