mod file;
mod project;
mod user;
mod workspace;

pub use file::FileItem;
pub use project::{CreateProjectRequest, Project, UpdateProjectRequest};
pub use user::{LoginRequest, RegisterRequest, User};
pub use workspace::{CreateWorkspaceRequest, UpdateWorkspaceRequest, Workspace};
