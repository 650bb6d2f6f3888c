mod admin_dto;

pub use admin_dto::{CategoryCountDto, PriorityCountDto, SetAdminDto, StatsDto};
