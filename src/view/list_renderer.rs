use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::categories;
use crate::content::PostMeta;
use crate::view::{post_cards, PostCard};

#[derive(ramhorns::Content)]
struct ListPage {
    heading: String,
    description: String,
    posts: Vec<PostCard>,
    categories: Vec<CategoryItem>,
    page_list: Vec<ViewPagination>,
    show_pagination: bool,
}

#[derive(ramhorns::Content)]
struct CategoryItem {
    name: String,
    link: String,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: u32,
}

pub struct ListRenderer<'a> {
    template: Template<'a>,
    page_count: u32,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str, page_count: u32) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing list template: {}", e),
                ))
            }
        };

        Ok(ListRenderer {
            template,
            page_count,
        })
    }

    pub fn render(&self, posts: &[PostMeta], cur_page: u32, heading: &str, description: &str) -> String {
        let categories = categories::all()
            .iter()
            .map(|category| CategoryItem {
                name: category.name.to_string(),
                link: format!("/blog/category/{}", category.slug),
            })
            .collect();

        let page_list: Vec<ViewPagination> = (1..=self.page_count)
            .map(|number| ViewPagination {
                current: number == cur_page,
                number,
            })
            .collect();

        self.template.render(&ListPage {
            heading: heading.to_string(),
            description: description.to_string(),
            posts: post_cards(posts),
            categories,
            show_pagination: self.page_count > 1,
            page_list,
        })
    }
}
