use std::io;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::fs;

use chrono::Duration;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use ramhorns::Template;
use spdlog::info;

use crate::categories;
use crate::config::Config;
use crate::content::{Author, Post, PostMeta};
use crate::content_cache::{ContentCache, Expire};
use crate::paginator::Paginator;
use crate::post_repository::{PostDefaults, PostRepository};
use crate::query_string::QueryString;
use crate::text_utils::tag_slug_from_segment;
use crate::view::index_renderer::IndexRenderer;
use crate::view::list_renderer::ListRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::RssChannel;

const STATIC_PAGES: &[&str] = &["about", "services", "projects", "contact"];
const FEATURED_LIMIT: usize = 3;
const RECENT_LIMIT: usize = 6;
const RELATED_LIMIT: usize = 3;
const FEED_LIMIT: usize = 20;

struct AppState {
    config: Config,
    repository: PostRepository,
    meta_cache: ContentCache<Vec<PostMeta>>,
    post_cache: ContentCache<Post>,
}

impl AppState {
    fn expire(&self) -> Expire {
        match self.config.defaults.cache_ttl_secs {
            Some(secs) => Expire::After(Duration::seconds(secs)),
            None => Expire::Never,
        }
    }

    fn all_posts(&self) -> io::Result<Arc<Vec<PostMeta>>> {
        self.meta_cache.get_or("all-posts", self.expire(), || {
            info!("Scanning content directory for the post list");
            Ok(self.repository.list_all())
        })
    }

    fn post(&self, slug: &str) -> Option<Arc<Post>> {
        let key = format!("post-{}", slug);
        self.post_cache
            .get_or(&key, self.expire(), || {
                info!("Rendering post {} from file", slug);
                self.repository
                    .get_by_slug(slug)
                    .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Could not find post"))
            })
            .ok()
    }
}

fn read_template(tpl_dir: &PathBuf, file_name: &str) -> io::Result<String> {
    fs::read_to_string(tpl_dir.join(file_name))
}

fn html_ok(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn get_cur_page(req: HttpRequest) -> u32 {
    if let Some(query_str) = req.uri().query() {
        QueryString::from(query_str).page()
    } else {
        1
    }
}

fn render_index(state: &AppState) -> io::Result<String> {
    let posts = state.all_posts()?;
    let featured: Vec<PostMeta> = PostRepository::filter_featured(&posts)
        .into_iter()
        .take(FEATURED_LIMIT)
        .collect();
    let recent: Vec<PostMeta> = posts.iter().take(RECENT_LIMIT).cloned().collect();

    let tpl_src = read_template(&state.config.paths.template_dir, "index.tpl")?;
    let renderer = IndexRenderer::new(&tpl_src)?;
    Ok(renderer.render(&state.config.site, &featured, &recent))
}

fn render_post_list(state: &AppState, cur_page: u32) -> io::Result<String> {
    let posts = state.all_posts()?;
    let paginator = Paginator::from(posts.as_slice(), state.config.defaults.page_size);
    let cur_page = match cur_page {
        // Sanity check for the requested page
        0 => 1,
        x if x > paginator.page_count() => 1,
        x => x,
    };

    let page: &[PostMeta] = if paginator.page_count() == 0 {
        &[]
    } else {
        paginator
            .get_page(cur_page)
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e))?
    };

    let tpl_src = read_template(&state.config.paths.template_dir, "postlist.tpl")?;
    let renderer = ListRenderer::new(&tpl_src, paginator.page_count())?;
    Ok(renderer.render(page, cur_page, "Blog", &state.config.site.description))
}

fn render_filtered_list(
    state: &AppState,
    posts: &[PostMeta],
    heading: &str,
    description: &str,
) -> io::Result<String> {
    let tpl_src = read_template(&state.config.paths.template_dir, "postlist.tpl")?;
    let renderer = ListRenderer::new(&tpl_src, 0)?;
    Ok(renderer.render(posts, 1, heading, description))
}

fn render_post_page(state: &AppState, post: &Post) -> io::Result<String> {
    let posts = state.all_posts()?;
    let related = PostRepository::filter_related(&posts, &post.meta, RELATED_LIMIT);

    let tpl_src = read_template(&state.config.paths.template_dir, "view.tpl")?;
    let renderer = PostRenderer::new(&tpl_src)?;
    Ok(renderer.render(post, &related))
}

fn render_static_page(state: &AppState, page: &str) -> io::Result<String> {
    let tpl_src = read_template(&state.config.paths.template_dir, &format!("{}.tpl", page))?;
    let template = Template::new(tpl_src).map_err(|e| {
        io::Error::new(
            ErrorKind::InvalidInput,
            format!("Error parsing {} template: {}", page, e),
        )
    })?;

    #[derive(ramhorns::Content)]
    struct PageView {
        site_title: String,
        site_description: String,
    }

    Ok(template.render(&PageView {
        site_title: state.config.site.title.clone(),
        site_description: state.config.site.description.clone(),
    }))
}

fn render_feed(state: &AppState) -> io::Result<Vec<u8>> {
    let posts = state.all_posts()?;
    let site = &state.config.site;
    let (title, description, limit) = match state.config.rss_feed {
        Some(ref feed_cfg) => (
            feed_cfg.title.clone(),
            feed_cfg.description.clone(),
            feed_cfg.page_size as usize,
        ),
        None => (site.title.clone(), site.description.clone(), FEED_LIMIT),
    };
    let items: Vec<PostMeta> = posts.iter().take(limit).cloned().collect();

    let channel = RssChannel {
        ch_title: &title,
        ch_link: &site.base_url,
        ch_desc: &description,
    };
    channel
        .render(&items)
        .map_err(|e| io::Error::new(ErrorKind::InvalidData, format!("Error rendering feed: {}", e)))
}

#[web::get("/")]
async fn index(state: web::types::State<Arc<Mutex<AppState>>>) -> web::HttpResponse {
    let state = state.lock().unwrap();
    match render_index(&state) {
        Ok(html) => html_ok(html),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering home page: {}", e)),
    }
}

#[web::get("/blog")]
async fn blog_list(
    req: HttpRequest,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> web::HttpResponse {
    let state = state.lock().unwrap();
    let cur_page = get_cur_page(req);
    match render_post_list(&state, cur_page) {
        Ok(html) => html_ok(html),
        Err(e) => {
            web::HttpResponse::InternalServerError().body(format!("Error listing posts: {}", e))
        }
    }
}

#[web::get("/blog/{slug}")]
async fn blog_post(
    path: web::types::Path<String>,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> web::HttpResponse {
    let state = state.lock().unwrap();
    let slug = path.into_inner();

    let post = match state.post(&slug) {
        Some(post) => post,
        None => return web::HttpResponse::NotFound().body(format!("No post with slug {}", slug)),
    };

    match render_post_page(&state, &post) {
        Ok(html) => html_ok(html),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error loading post {}: {}", slug, e)),
    }
}

#[web::get("/blog/category/{category}")]
async fn blog_category(
    path: web::types::Path<String>,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> web::HttpResponse {
    let state = state.lock().unwrap();
    let category_slug = path.into_inner();

    let category = match categories::by_slug(&category_slug) {
        Some(category) => category,
        None => {
            return web::HttpResponse::NotFound()
                .body(format!("No category with slug {}", category_slug))
        }
    };

    let posts = match state.all_posts() {
        Ok(posts) => posts,
        Err(e) => {
            return web::HttpResponse::InternalServerError()
                .body(format!("Error listing posts: {}", e))
        }
    };
    let filtered = PostRepository::filter_by_category(&posts, &category_slug);

    match render_filtered_list(&state, &filtered, category.name, category.description) {
        Ok(html) => html_ok(html),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error listing category {}: {}", category_slug, e)),
    }
}

#[web::get("/blog/tag/{tag}")]
async fn blog_tag(
    path: web::types::Path<String>,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> web::HttpResponse {
    let state = state.lock().unwrap();
    let segment = path.into_inner();
    let tag_slug = tag_slug_from_segment(&segment);

    let posts = match state.all_posts() {
        Ok(posts) => posts,
        Err(e) => {
            return web::HttpResponse::InternalServerError()
                .body(format!("Error listing posts: {}", e))
        }
    };
    let filtered = PostRepository::filter_by_tag(&posts, &tag_slug);
    if filtered.is_empty() {
        return web::HttpResponse::NotFound().body(format!("No posts tagged {}", segment));
    }

    let heading = format!("#{}", segment.replace('-', " "));
    let description = format!("Browse all articles tagged with {}", heading);
    match render_filtered_list(&state, &filtered, &heading, &description) {
        Ok(html) => html_ok(html),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error listing tag {}: {}", segment, e)),
    }
}

#[web::get("/feed.xml")]
async fn feed(state: web::types::State<Arc<Mutex<AppState>>>) -> web::HttpResponse {
    let state = state.lock().unwrap();
    match render_feed(&state) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(xml),
        Err(e) => {
            web::HttpResponse::InternalServerError().body(format!("Error rendering feed: {}", e))
        }
    }
}

#[web::get("/public/{file_name}")]
async fn public_files(
    path: web::types::Path<String>,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let state = state.lock().unwrap();
    let file_path = state.config.paths.public_dir.join(path.into_inner());

    Ok(NamedFile::open(file_path)?)
}

#[web::get("/{page}")]
async fn static_page(
    path: web::types::Path<String>,
    state: web::types::State<Arc<Mutex<AppState>>>,
) -> web::HttpResponse {
    let page = path.into_inner();
    if !STATIC_PAGES.contains(&page.as_str()) {
        return web::HttpResponse::NotFound().body(format!("No page named {}", page));
    }

    let state = state.lock().unwrap();
    match render_static_page(&state, &page) {
        Ok(html) => html_ok(html),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering page {}: {}", page, e)),
    }
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let defaults = PostDefaults {
        author: Author {
            name: config.site.author_name.clone(),
            image: config.site.author_image.clone(),
        },
        cover_image: config.site.default_cover_image.clone(),
    };
    let repository = PostRepository::new(config.paths.content_dir.clone(), defaults);

    for slug in repository.list_slugs() {
        info!("Post: {}", slug);
    }

    let (meta_cache, post_cache) = if config.defaults.rendering_cache_enabled {
        (ContentCache::new(), ContentCache::new())
    } else {
        (ContentCache::non_caching(), ContentCache::non_caching())
    };

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(Mutex::new(AppState {
        config,
        repository,
        meta_cache,
        post_cache,
    }));

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(public_files)
            .service(feed)
            .service(blog_list)
            .service(blog_category)
            .service(blog_tag)
            .service(blog_post)
            .service(static_page)
    })
    .bind((bind_addr, bind_port))?
    .run()
    .await
}
