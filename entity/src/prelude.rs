pub use super::invite_counter::Entity as InviteCounter;
pub use super::join_record::Entity as JoinRecord;
