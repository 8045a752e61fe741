use super::entities::{Assignment, Content, Video};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct ContentListResponse {
    pub items: Vec<Content>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct VideoListResponse {
    pub items: Vec<Video>,
}
