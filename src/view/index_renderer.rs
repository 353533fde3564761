use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::config::Site;
use crate::content::PostMeta;
use crate::view::{post_cards, PostCard};

#[derive(ramhorns::Content)]
struct IndexPage {
    site_title: String,
    site_description: String,
    featured: Vec<PostCard>,
    has_featured: bool,
    recent: Vec<PostCard>,
}

pub struct IndexRenderer<'a> {
    template: Template<'a>,
}

impl IndexRenderer<'_> {
    pub fn new(index_tpl_src: &str) -> io::Result<IndexRenderer> {
        let template = match Template::new(index_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing index template: {}", e),
                ))
            }
        };

        Ok(IndexRenderer { template })
    }

    pub fn render(&self, site: &Site, featured: &[PostMeta], recent: &[PostMeta]) -> String {
        self.template.render(&IndexPage {
            site_title: site.title.clone(),
            site_description: site.description.clone(),
            featured: post_cards(featured),
            has_featured: !featured.is_empty(),
            recent: post_cards(recent),
        })
    }
}
