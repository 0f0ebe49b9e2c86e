use anyhow::Result;
use clap::Parser;
use toroid_snake::config::Config;
use toroid_snake::game::Game;
use toroid_snake::logging;

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(config.log_file.as_deref())?;

    let mut game = Game::new(&config)?;
    game.run()?;
    Ok(())
}
