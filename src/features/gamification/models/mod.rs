mod badge;

pub use badge::{Badge, BadgeSpec, BadgeType};
