use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Site {
    pub title: String,
    pub base_url: String,
    pub description: String,
    pub author_name: String,
    pub author_image: String,
    pub default_cover_image: String,
}

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub content_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Defaults {
    pub page_size: u32,
    pub rendering_cache_enabled: bool,
    /// Cached renders are kept this long; absent means they never expire.
    pub cache_ttl_secs: Option<i64>,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct RssFeed {
    pub title: String,
    pub description: String,
    pub page_size: u32,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub defaults: Defaults,
    pub server: Server,
    pub log: Option<Log>,
    pub rss_feed: Option<RssFeed>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => {
            return Err(io::Error::new(
                e.kind(),
                format!("Error opening configuration file {}: {}", cfg_path.display(), e),
            ))
        }
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Error parsing configuration file: {}", e),
            ))
        }
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir),
        public_dir: parse_path(cfg.paths.public_dir),
        content_dir: parse_path(cfg.paths.content_dir),
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r##"
[site]
title = "Rexin"
base_url = "https://rexin.dev"
description = "Firmware, hardware and the occasional bit of Rust"
author_name = "Rexin"
author_image = "/images/author-default.jpg"
default_cover_image = "/images/blog/default-cover.jpg"

[paths]
template_dir = "templates"
public_dir = "public"
content_dir = "res/posts"

[defaults]
page_size = 10
rendering_cache_enabled = true
cache_ttl_secs = 3600

[server]
address = "127.0.0.1"
port = 8080
"##;
        let cfg: Config = toml::from_str::<Config>(toml_str).unwrap();
        assert_eq!(cfg.site.title, "Rexin");
        assert_eq!(cfg.defaults.page_size, 10);
        assert_eq!(cfg.defaults.cache_ttl_secs, Some(3600));
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.log.is_none());
        assert!(cfg.rss_feed.is_none());
        assert_eq!(cfg.paths.content_dir, PathBuf::from("res/posts"));
    }
}
