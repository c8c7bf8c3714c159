//! `/projects`

use crate::client::{segment, ApiRequest, ClientResult};
use crate::models::{Id, NewProject, ProgressUpdate};

pub fn list() -> ApiRequest {
    ApiRequest::get("/projects")
}

pub fn get(id: Id) -> ApiRequest {
    ApiRequest::get(format!("/projects/{}", segment(id)))
}

pub fn create(project: &NewProject) -> ClientResult<ApiRequest> {
    ApiRequest::post("/projects").json(project)
}

/// The project id travels in the body, not the path
pub fn update_progress(update: &ProgressUpdate) -> ClientResult<ApiRequest> {
    ApiRequest::post("/projects/progress").json(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_paths() {
        let progress = update_progress(&ProgressUpdate {
            project_id: 4,
            progress_percentage: Decimal::from(40),
            notes: None,
        })
        .unwrap();
        assert_eq!(progress.path, "/projects/progress");
        assert_eq!(progress.body.as_ref().unwrap()["project_id"], 4);

        assert_eq!(get(4).path, "/projects/4");
        assert_eq!(list().path, "/projects");
        assert_eq!(create(&NewProject::default()).unwrap().path, "/projects");
    }
}
