use std::io;

use clap::Args;
use storefront::{context::StorefrontContext, themes::ThemeId, views};

use super::output_error;

#[derive(Debug, Args)]
pub(crate) struct ThemeArgs {
    /// Theme to select (theme1, theme2, theme3)
    theme: Option<ThemeId>,
}

pub(crate) fn run(args: ThemeArgs, context: &StorefrontContext) -> Result<(), String> {
    if let Some(theme) = args.theme {
        context.storage.save_theme(theme);
    }

    views::write_themes(io::stdout().lock(), context.storage.load_theme()).map_err(output_error)
}
