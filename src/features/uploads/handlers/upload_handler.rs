use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Request, State},
    response::{IntoResponse, Response},
};
use minijinja::context;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::Notice;
use crate::core::state::PageState;
use crate::features::uploads::dtos::FilePart;
use crate::features::uploads::services::UploadService;
use crate::shared::constants::{
    NOTICE_INVALID_FILENAME, NOTICE_NO_FILE_PART, NOTICE_NO_SELECTED_FILE, NOTICE_UPLOAD_SUCCESS,
};

/// Name of the multipart field carrying the file
const FILE_FIELD: &str = "file";

/// Upload form with every uploaded file
pub async fn upload_page(
    State(state): State<PageState<UploadService>>,
    notice: Notice,
) -> Result<Response> {
    let files = state.service.list().await?;

    state
        .web
        .render("upload.html", &notice, context! { files })
}

/// Upload a file
///
/// Accepts multipart/form-data with a `file` part. Other parts are ignored.
/// Always ends in a redirect back to `/upload` unless the body is too large
/// or the store fails.
pub async fn upload_file(
    State(state): State<PageState<UploadService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    let part = match multipart {
        Ok(multipart) => read_file_part(multipart).await?,
        Err(rejection) => {
            debug!("Upload without multipart body: {}", rejection.body_text());
            None
        }
    };

    let (file_name, data) = match selected_file(part) {
        Ok(selected) => selected,
        Err(notice) => return Ok(state.web.redirect_with_notice("/upload", notice)),
    };

    match state.service.store_upload(&file_name, &data).await {
        Ok(_) => Ok(state
            .web
            .redirect_with_notice("/upload", NOTICE_UPLOAD_SUCCESS)),
        Err(AppError::Validation(reason)) => {
            debug!("Upload rejected: {}", reason);
            Ok(state
                .web
                .redirect_with_notice("/upload", NOTICE_INVALID_FILENAME))
        }
        Err(e) => Err(e),
    }
}

/// Filename and content of a usable file part, or the notice explaining why not
fn selected_file(part: Option<FilePart>) -> std::result::Result<(String, Vec<u8>), &'static str> {
    match part {
        // A part without any filename is a plain form field, not a file
        None
        | Some(FilePart {
            file_name: None, ..
        }) => Err(NOTICE_NO_FILE_PART),
        Some(FilePart {
            file_name: Some(name),
            ..
        }) if name.is_empty() => Err(NOTICE_NO_SELECTED_FILE),
        Some(FilePart {
            file_name: Some(name),
            data,
        }) => Ok((name, data)),
    }
}

/// Read the first `file` part, skipping everything else
async fn read_file_part(mut multipart: Multipart) -> Result<Option<FilePart>> {
    let mut part = None;

    while let Some(field) = multipart.next_field().await? {
        if part.is_some() || field.name() != Some(FILE_FIELD) {
            debug!("Ignoring multipart field: {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await?;

        part = Some(FilePart {
            file_name,
            data: data.to_vec(),
        });
    }

    Ok(part)
}

/// Stream a file from the upload directory
pub async fn download_file(
    State(state): State<PageState<UploadService>>,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response> {
    let path = state.service.locate(&filename).await?;

    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    Ok(response.into_response())
}
