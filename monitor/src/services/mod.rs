// File: monitor/src/services/mod.rs

pub mod notification_service;

pub use notification_service::NotificationService;
