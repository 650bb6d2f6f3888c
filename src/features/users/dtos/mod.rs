mod user_dto;

pub use user_dto::{BadgeResponseDto, LeaderboardDto, LeaderboardEntryDto, ProfileDto, UserResponseDto};
