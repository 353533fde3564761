use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;

use rexblog::text_utils::slugify;
use rexblog::util::os_helper::get_name;

#[derive(Parser, Debug)]
#[command(version, about = "Scaffold a new blog post with front matter", long_about = None)]
struct Args {
    /// Post title
    #[arg(short, long)]
    title: String,

    /// Category name, free text
    #[arg(short, long)]
    category: Option<String>,

    /// Tags attached to the post; repeat for several
    #[arg(short = 'g', long)]
    tag: Vec<String>,

    /// Name of the author. If empty, OS user real name is being used
    #[arg(short, long)]
    name: Option<String>,

    /// Directory receiving the new content file
    #[arg(short, long, default_value = "res/posts")]
    output: PathBuf,
}

fn get_author(args: &Args) -> String {
    if let Some(ref name) = args.name {
        return name.clone();
    }

    get_name()
}

fn render_front_matter(args: &Args, author: &str, date: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", args.title);
    let _ = writeln!(&mut buf, "date: {}", date);
    let _ = writeln!(&mut buf, "excerpt: \"\"");
    if let Some(ref category) = args.category {
        let _ = writeln!(&mut buf, "category: {}", category);
    }
    let _ = writeln!(&mut buf, "featured: false");
    if !args.tag.is_empty() {
        let _ = writeln!(&mut buf, "tags:");
        for tag in &args.tag {
            let _ = writeln!(&mut buf, "  - {}", tag);
        }
    }
    let _ = writeln!(&mut buf, "author:");
    let _ = writeln!(&mut buf, "  name: {}", author);
    let _ = writeln!(&mut buf, "---");
    buf
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "");
    let _ = writeln!(&mut buf, "This is a body example.");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content.");

    buf
}

fn main() -> Result<()> {
    let args = Args::parse();

    let slug = slugify(&args.title);
    if slug.is_empty() {
        bail!("Title {:?} does not produce a usable slug", args.title);
    }

    let author = get_author(&args);
    let date = Utc::now().date_naive().format("%Y-%m-%d").to_string();

    let file_path = args.output.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("{} already exists", file_path.display());
    }

    let mut contents = render_front_matter(&args, &author, &date);
    contents.push_str(&render_body());

    fs::write(&file_path, contents)
        .with_context(|| format!("Error writing {}", file_path.display()))?;
    println!("Created {}", file_path.display());

    Ok(())
}
