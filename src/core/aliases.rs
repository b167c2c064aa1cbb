pub type ScheduleId = i32;
pub type SupplierId = i32;
pub type ArticleId = i32;
pub type UserId = i32;
