//! Shared logic for the portwatch dashboard.
//!
//! This crate is free of wasm dependencies so everything the dashboard
//! decides (bucketing, preference resolution, row layout, sorting, edit
//! normalization) can be unit tested natively. It contains:
//! - **Wire models**: interfaces, services, saved preferences, write payloads
//! - **Buckets**: tcpv4 / tcpv6 / udpv4 / udpv6 classification
//! - **Preference cache**: service names, link visibility, columns, URL paths
//! - **View-model**: table rows and cells, plus an HTML string renderer
//! - **Interaction state**: sort controller and inline editor state machine

pub mod bucket;
pub mod columns;
pub mod config;
pub mod editor;
pub mod error;
pub mod html;
pub mod models;
pub mod prefs;
pub mod sort;
pub mod view;
