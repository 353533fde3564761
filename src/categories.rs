/// Static category registry. A post names its category as free text; the
/// registry only drives routing and the category index page, so a post
/// with a category that is not listed here is still served under the
/// general listing.
pub struct Category {
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Firmware Dev",
        slug: "firmware-dev",
        description: "Articles about firmware development, embedded systems, and low-level programming.",
    },
    Category {
        name: "Hardware",
        slug: "hardware",
        description: "Posts about hardware design, PCB layout, and electronic components.",
    },
    Category {
        name: "Programming",
        slug: "programming",
        description: "General programming topics, algorithms, and software development.",
    },
    Category {
        name: "Firmware Hacking",
        slug: "firmware-hacking",
        description: "Techniques for analyzing, modifying, and exploiting existing firmware.",
    },
    Category {
        name: "Firmware Extract",
        slug: "firmware-extract",
        description: "Methods for extracting and unpacking device firmware for analysis.",
    },
    Category {
        name: "Hardware Design",
        slug: "hardware-design",
        description: "Electronics design, circuit analysis, and hardware development.",
    },
    Category {
        name: "Schematic Design",
        slug: "schematic-design",
        description: "Creating and understanding electronic circuit schematics and PCB layouts.",
    },
    Category {
        name: "C Programming",
        slug: "c-programming",
        description: "Tips, tricks, and tutorials for programming in the C language.",
    },
    Category {
        name: "C++ Programming",
        slug: "cpp-programming",
        description: "Object-oriented programming and advanced techniques in C++.",
    },
    Category {
        name: "Rust Programming",
        slug: "rust-programming",
        description: "Memory-safe systems programming with Rust language.",
    },
    Category {
        name: "JavaScript",
        slug: "javascript",
        description: "Web development and scripting with JavaScript.",
    },
    Category {
        name: "TypeScript",
        slug: "typescript",
        description: "Strongly-typed JavaScript development with TypeScript.",
    },
    Category {
        name: "Ada Programming",
        slug: "ada-programming",
        description: "Reliable and secure programming with the Ada language.",
    },
    Category {
        name: "Assembly",
        slug: "assembly",
        description: "Low-level programming with assembly language for various architectures.",
    },
];

pub fn all() -> &'static [Category] {
    CATEGORIES
}

pub fn by_slug(slug: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_slug() {
        let category = by_slug("firmware-dev").unwrap();
        assert_eq!(category.name, "Firmware Dev");
        assert!(by_slug("no-such-category").is_none());
    }

    #[test]
    fn test_slugs_are_unique() {
        for (i, a) in CATEGORIES.iter().enumerate() {
            for b in &CATEGORIES[i + 1..] {
                assert_ne!(a.slug, b.slug);
            }
        }
    }
}
