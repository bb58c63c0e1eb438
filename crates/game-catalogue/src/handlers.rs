//! Request handlers, one per route

use game_catalogue_sdk::{HandlerError, Request, Response};

use crate::model::{platforms_of, GameKey, GameStatus, NewGame};
use crate::paths;
use crate::render::Page;
use crate::router::Route;
use crate::state::AppState;

/// Run the handler for `route`
pub async fn handle(state: &AppState, route: Route, request: &Request) -> Result<Response, HandlerError> {
    match route {
        Route::ListOwned => list_games(state).await,
        Route::ListWishlist => list_wishlist(state).await,
        Route::ListPlatform(platform) => list_platform(state, &platform).await,
        Route::AddGame => add_game(state, request).await,
        Route::AddToWishlist => add_to_wishlist(state, request).await,
        Route::MarkPurchased => mark_as_purchased(state, request).await,
        Route::DeleteGame => delete_game(state, request).await,
        Route::DeleteFromWishlist => delete_from_wishlist(state, request).await,
        Route::NotFound => Err(HandlerError::NotFound),
    }
}

/// GET / - owned games across every platform
async fn list_games(state: &AppState) -> Result<Response, HandlerError> {
    let games = state.store.list_owned().await?;
    let platforms = platforms_of(&games);
    state.renderer.respond(&Page::Index {
        games: &games,
        platforms: &platforms,
        selected_platform: None,
    })
}

/// GET /wishlist
async fn list_wishlist(state: &AppState) -> Result<Response, HandlerError> {
    let wishlist = state.store.list_wishlist().await?;
    let platforms = platforms_of(&wishlist);
    state.renderer.respond(&Page::Wishlist {
        wishlist: &wishlist,
        platforms: &platforms,
    })
}

/// GET /<platform> - owned games of one platform
async fn list_platform(state: &AppState, platform: &str) -> Result<Response, HandlerError> {
    let games = state.store.list_owned_by_platform(platform).await?;
    let platforms = platforms_of(&games);
    state.renderer.respond(&Page::Index {
        games: &games,
        platforms: &platforms,
        selected_platform: Some(platform),
    })
}

/// POST /add
async fn add_game(state: &AppState, request: &Request) -> Result<Response, HandlerError> {
    let record = state
        .store
        .create(NewGame::from_form(&request.form()), GameStatus::Owned)
        .await?;
    tracing::info!(platform = %record.platform, game = %record.game_name, "Added game");
    Ok(platform_redirect(state, &record.platform))
}

/// POST /wishlist/add
async fn add_to_wishlist(state: &AppState, request: &Request) -> Result<Response, HandlerError> {
    let record = state
        .store
        .create(NewGame::from_form(&request.form()), GameStatus::Wishlist)
        .await?;
    tracing::info!(platform = %record.platform, game = %record.game_name, "Added to wishlist");
    Ok(wishlist_redirect(state))
}

/// POST /wishlist/purchased
async fn mark_as_purchased(state: &AppState, request: &Request) -> Result<Response, HandlerError> {
    let key = GameKey::from_form(&request.form())?;
    state.store.set_status_owned(&key).await?;
    tracing::info!(platform = %key.platform, game_id = %key.game_id, "Marked as purchased");
    Ok(wishlist_redirect(state))
}

/// DELETE /delete
async fn delete_game(state: &AppState, request: &Request) -> Result<Response, HandlerError> {
    let key = GameKey::from_form(&request.form())?;
    state.store.delete(&key).await?;
    tracing::info!(platform = %key.platform, game_id = %key.game_id, "Deleted game");
    Ok(platform_redirect(state, &key.platform))
}

/// DELETE /wishlist/delete
async fn delete_from_wishlist(state: &AppState, request: &Request) -> Result<Response, HandlerError> {
    let key = GameKey::from_form(&request.form())?;
    state.store.delete(&key).await?;
    tracing::info!(platform = %key.platform, game_id = %key.game_id, "Deleted from wishlist");
    Ok(wishlist_redirect(state))
}

fn platform_redirect(state: &AppState, platform: &str) -> Response {
    Response::see_other(paths::platform_page(state.route_prefix(), platform))
}

fn wishlist_redirect(state: &AppState) -> Response {
    Response::see_other(paths::prefixed(state.route_prefix(), "wishlist"))
}
