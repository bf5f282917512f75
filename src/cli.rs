use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "geologis",
    about = "HTTP server that serves countries, continents and cities worldwide",
    version,
    author
)]
pub struct Args {
    /// Port to listen on, overrides SERVER_PORT
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding countries.json and continents.json, overrides DATA_DIR
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from(["geologis", "--port", "3000", "-d", "/srv/geo"]);
        assert_eq!(args.port, Some(3000));
        assert_eq!(args.data_dir, Some(PathBuf::from("/srv/geo")));

        let args = Args::parse_from(["geologis"]);
        assert_eq!(args.port, None);
        assert_eq!(args.data_dir, None);
    }
}
