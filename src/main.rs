use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use gridsnake::app::App;
use gridsnake::game::GameConfig;
use gridsnake::highscore::JsonScoreStore;

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Canvas width in pixels
    #[arg(long, default_value = "400")]
    canvas_width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "400")]
    canvas_height: u32,

    /// Cell size in pixels; the grid is canvas size over cell size
    #[arg(long, default_value = "20")]
    cell_size: u32,

    /// Where the high score is kept between runs
    #[arg(long, default_value = "gridsnake_scores.json")]
    score_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig::new(cli.canvas_width, cli.canvas_height, cli.cell_size);
    let store = JsonScoreStore::new(cli.score_file);

    let mut app = App::new(config, Box::new(store))?;
    app.run().await
}
