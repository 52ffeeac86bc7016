// src/handlers/mod.rs

pub mod admin_users;
pub mod announcements;
pub mod auth;
pub mod contact;
pub mod events;
pub mod giving_records;
pub mod members;
pub mod ministries;
pub mod prayer_requests;
pub mod sermons;
pub mod small_groups;
pub mod visitors;
