//! 课程资料：作业、图文内容与视频

pub mod entities;
pub mod requests;
pub mod responses;
