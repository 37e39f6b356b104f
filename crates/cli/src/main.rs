use anyhow::Context;
use clap::Parser;
use membership_card_core::{init_fonts, init_logging, CardRenderer, CardRequest, RenderConfig};
use std::path::PathBuf;

/// Render one membership card to PDF.
#[derive(Parser, Debug)]
#[command(name = "membership-card")]
#[command(about = "Render a membership card with QR code and logo to PDF")]
struct Args {
    /// Member's first name
    #[arg(default_value = "Ime")]
    first_name: String,

    /// Member's last name
    #[arg(default_value = "Prezime")]
    last_name: String,

    /// Membership card number
    #[arg(default_value = "MBR-000001")]
    member_id: String,

    /// Join date, YYYY-MM-DD
    #[arg(default_value = "2024-01-01")]
    join_date: String,

    /// Output PDF path [default: <temp dir>/card.pdf]
    output_path: Option<PathBuf>,

    /// Logo image; skipped if the file does not exist
    #[arg(default_value = "./logo.png")]
    logo_path: PathBuf,

    /// Directory holding DejaVuSans.ttf and DejaVuSans-Bold.ttf
    #[arg(long, default_value = "./fonts")]
    fonts_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging();
    tracing::debug!("CLI args: {:?}", args);

    init_fonts(&args.fonts_dir);

    let output_path = args
        .output_path
        .unwrap_or_else(|| std::env::temp_dir().join("card.pdf"));

    let request = CardRequest::new(
        args.first_name,
        args.last_name,
        args.member_id,
        args.join_date,
        output_path,
    )
    .with_logo(args.logo_path);

    let result = CardRenderer::new(RenderConfig::default())
        .and_then(|renderer| renderer.render(&request));

    match result {
        Ok(card) => {
            println!("[OK] Card generated: {}", card.output_path.display());
            Ok(())
        }
        Err(e) => {
            println!("[ERROR] Card generation error: {}", e);
            Err(e).context("card generation failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["membership-card"]);
        assert_eq!(args.first_name, "Ime");
        assert_eq!(args.last_name, "Prezime");
        assert_eq!(args.member_id, "MBR-000001");
        assert_eq!(args.join_date, "2024-01-01");
        assert!(args.output_path.is_none());
        assert_eq!(args.logo_path, PathBuf::from("./logo.png"));
        assert_eq!(args.fonts_dir, PathBuf::from("./fonts"));
    }

    #[test]
    fn test_positional_order() {
        let args = Args::parse_from([
            "membership-card",
            "Petar",
            "Petrović",
            "MBR-000123",
            "2022-11-05",
            "/tmp/cards/petar.pdf",
            "assets/logo.png",
            "--fonts-dir",
            "/usr/share/fonts/dejavu",
        ]);
        assert_eq!(args.first_name, "Petar");
        assert_eq!(args.last_name, "Petrović");
        assert_eq!(args.member_id, "MBR-000123");
        assert_eq!(args.join_date, "2022-11-05");
        assert_eq!(args.output_path, Some(PathBuf::from("/tmp/cards/petar.pdf")));
        assert_eq!(args.logo_path, PathBuf::from("assets/logo.png"));
        assert_eq!(args.fonts_dir, PathBuf::from("/usr/share/fonts/dejavu"));
    }
}
