#[cfg(test)]
pub const POST_FULL_FRONT_MATTER: &str = r#"---
title: Dumping SPI Flash
date: 2024-02-12
excerpt: Reading firmware off an 8-pin flash chip.
coverImage: /images/blog/spi-flash.jpg
category: Firmware Extract
featured: true
tags:
  - spi
  - flash dump
author:
  name: Rexin
  image: /images/author.jpg
---
So you found an SOIC-8 package sitting next to the main controller. Odds
are good it is an SPI NOR flash holding the firmware.

## Wiring the clip

Attach the test clip with the board powered off.
"#;

#[cfg(test)]
pub const POST_BAD_YAML: &str = r#"---
title: Broken metadata
featured: not-a-bool
---
This file has a broken metadata block.
"#;
