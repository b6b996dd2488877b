//! Common test utilities for campus-progress-core integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{MockCourseRepository, MockEnrollmentRepository};

use campus_progress_core::{ProgressConfig, ProgressEngine};
use std::sync::Arc;

pub type TestEngine = ProgressEngine<MockEnrollmentRepository, MockCourseRepository>;

/// Engine over in-memory stores, returned with handles to those stores
#[allow(dead_code)]
pub fn test_engine(
    config: ProgressConfig,
) -> (TestEngine, MockEnrollmentRepository, MockCourseRepository) {
    let enrollments = MockEnrollmentRepository::new();
    let courses = MockCourseRepository::new();
    let engine = ProgressEngine::new(
        config,
        Arc::new(enrollments.clone()),
        Arc::new(courses.clone()),
    );
    (engine, enrollments, courses)
}
