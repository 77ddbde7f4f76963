//! Photo handlers - the presentation boundary over the collection service.

use crate::error::{AppError, Result};
use crate::service::CollectionService;
use gridmuse_engine::{Command, PhotoId, PhotoRecord, SortValue, UnifiedList};
use serde::{Deserialize, Serialize};

/// Query parameters for listing photos.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only photos that are not hidden
    #[serde(default)]
    pub visible: bool,
}

/// Request body for a refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default = "default_full")]
    pub full: bool,
}

fn default_full() -> bool {
    true
}

impl Default for RefreshRequest {
    fn default() -> Self {
        Self { full: true }
    }
}

/// Request body for swap and insert.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub selected: SortValue,
    pub target: SortValue,
}

/// Request body for a visibility change.
#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub hidden: bool,
}

/// The list as rendered for clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoListResponse {
    pub photos: Vec<PhotoRecord>,
    pub local_count: usize,
    pub remote_count: usize,
    pub hidden_count: usize,
}

impl PhotoListResponse {
    pub fn from_list(list: &UnifiedList, visible_only: bool) -> Self {
        let photos = if visible_only {
            list.visible().cloned().collect()
        } else {
            list.iter().cloned().collect()
        };
        Self {
            photos,
            local_count: list.local().len(),
            remote_count: list.remote().len(),
            hidden_count: list.iter().filter(|r| r.is_hidden).count(),
        }
    }
}

/// Current list, no I/O.
pub fn handle_list(service: &CollectionService, query: ListQuery) -> PhotoListResponse {
    PhotoListResponse::from_list(&service.current_list(), query.visible)
}

pub async fn handle_refresh(
    service: &CollectionService,
    request: RefreshRequest,
) -> Result<PhotoListResponse> {
    let list = service.refresh(request.full).await?;
    Ok(PhotoListResponse::from_list(&list, false))
}

pub async fn handle_swap(
    service: &CollectionService,
    request: MoveRequest,
) -> Result<PhotoListResponse> {
    check_positions(request.selected, request.target)?;
    let list = service
        .swap_photos(request.selected, request.target)
        .await?;
    Ok(PhotoListResponse::from_list(&list, false))
}

pub async fn handle_insert(
    service: &CollectionService,
    request: MoveRequest,
) -> Result<PhotoListResponse> {
    check_positions(request.selected, request.target)?;
    let list = service
        .insert_photo_at_sort(request.selected, request.target)
        .await?;
    Ok(PhotoListResponse::from_list(&list, false))
}

pub async fn handle_visibility(
    service: &CollectionService,
    photo_id: PhotoId,
    request: VisibilityRequest,
) -> Result<PhotoListResponse> {
    let list = service.set_visibility(photo_id, request.hidden).await?;
    Ok(PhotoListResponse::from_list(&list, false))
}

pub async fn handle_command(
    service: &CollectionService,
    command: Command,
) -> Result<PhotoListResponse> {
    if let Command::Swap { selected, target } | Command::InsertAt { selected, target } = command {
        check_positions(selected, target)?;
    }
    let list = service.execute(command).await?;
    Ok(PhotoListResponse::from_list(&list, false))
}

pub async fn handle_reset(service: &CollectionService) -> Result<PhotoListResponse> {
    let list = service.reset().await?;
    Ok(PhotoListResponse::from_list(&list, false))
}

/// Remote and unplaced photos sit at sort 0 and cannot be moved.
fn check_positions(selected: SortValue, target: SortValue) -> Result<()> {
    if selected < 1 || target < 1 {
        return Err(AppError::BadRequest(format!(
            "sort positions must be positive, got {} and {}",
            selected, target
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmuse_engine::Origin;

    #[test]
    fn response_counts() {
        let mut hidden = PhotoRecord::new(1, "a.jpg", "", "").with_sort(1);
        hidden.is_hidden = true;
        let shown = PhotoRecord::new(2, "b.jpg", "", "").with_sort(2);
        let mut remote = PhotoRecord::new(0, "IMAGE", "", "");
        remote.origin = Origin::Remote;
        let list = UnifiedList::new(vec![hidden, shown], vec![remote]);

        let all = PhotoListResponse::from_list(&list, false);
        assert_eq!(all.photos.len(), 3);
        assert_eq!((all.local_count, all.remote_count, all.hidden_count), (2, 1, 1));

        let visible = PhotoListResponse::from_list(&list, true);
        let ids: Vec<_> = visible.photos.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 0]);
    }

    #[test]
    fn refresh_defaults_to_full() {
        let request: RefreshRequest = serde_json::from_str("{}").unwrap();
        assert!(request.full);
    }

    #[test]
    fn non_positive_positions_rejected() {
        assert!(check_positions(1, 2).is_ok());
        assert!(matches!(check_positions(0, 2), Err(AppError::BadRequest(_))));
        assert!(matches!(check_positions(3, -1), Err(AppError::BadRequest(_))));
    }
}
