use anyhow::Result;
use clap::Subcommand;

use instafeed_config::Config;
use instafeed_gallery::Favorites;

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// List favourited media ids
    List,
    /// Add or remove a media id
    Toggle { id: String },
}

pub async fn run(config: &Config, action: FavoritesAction) -> Result<()> {
    let mut favorites = Favorites::load(&config.favorites_path).await;

    match action {
        FavoritesAction::List => {
            if favorites.ids().is_empty() {
                println!("No favourites yet ({})", favorites.path().display());
            }
            for id in favorites.ids() {
                println!("{id}");
            }
        }
        FavoritesAction::Toggle { id } => {
            if favorites.toggle(&id).await? {
                println!("★ {id} added to favourites");
            } else {
                println!("☆ {id} removed from favourites");
            }
        }
    }

    Ok(())
}
