//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use workdeck_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Workdeck API",
        version = "0.1.0",
        description = "Multi-tenant workspace management API: user accounts, workspaces, projects, and per-project file storage with presigned downloads."
    ),
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::workspaces::list_workspaces,
        handlers::workspaces::create_workspace,
        handlers::workspaces::update_workspace,
        handlers::workspaces::delete_workspace,
        handlers::projects::list_projects,
        handlers::projects::create_project,
        handlers::projects::update_project,
        handlers::projects::delete_project,
        handlers::files::get_files,
        handlers::files::upload_file,
        handlers::files::delete_file,
        handlers::health::health_check,
    ),
    components(schemas(
        models::User,
        models::RegisterRequest,
        models::LoginRequest,
        models::Workspace,
        models::CreateWorkspaceRequest,
        models::UpdateWorkspaceRequest,
        models::Project,
        models::CreateProjectRequest,
        models::UpdateProjectRequest,
        models::FileItem,
        error::ErrorResponse,
        handlers::auth::UserResponse,
        handlers::workspaces::WorkspacesResponse,
        handlers::workspaces::WorkspaceResponse,
        handlers::workspaces::MessageResponse,
        handlers::projects::ProjectsResponse,
        handlers::projects::ProjectResponse,
        handlers::files::FilesResponse,
        handlers::files::FileResponse,
        handlers::files::DownloadUrlResponse,
        handlers::files::UploadUrlResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "workspaces", description = "Workspace management"),
        (name = "projects", description = "Project management"),
        (name = "files", description = "Project file storage"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
