// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 档案与搜索页面的CSS选择器
//!
//! 选择器以站点当前的DOM结构为准；分区容器缺失时各提取器
//! 返回空集合而不是报错。

// === 档案身份区 ===
pub const NAME: &str = "h1";
pub const HEADLINE: &str = "div.text-body-medium";
pub const LOCATION: &str = "span.text-body-small";
pub const PICTURE: &str = "img[class*='profile-picture']";

// === 档案分区容器（锚点div标记分区身份）===
pub const EXPERIENCE_SECTION: &str = "section:has(div#experience)";
pub const EDUCATION_SECTION: &str = "section:has(div#education)";
pub const PROJECTS_SECTION: &str = "section:has(div#projects)";
pub const HONORS_SECTION: &str = "section:has(div#honors_and_awards)";
pub const RECOMMENDATIONS_SECTION: &str = "section:has(div#recommendations)";

// === 分区条目 ===
pub const ENTITY_ITEM: &str = "li.artdeco-list__item";
/// 嵌套经历（同公司多段职位）的子列表容器
pub const SUB_LIST: &str = "div.pvs-entity__sub-components";
pub const SUB_LIST_CLASS: &str = "pvs-entity__sub-components";

// === 条目内字段 ===
pub const ENTITY_TITLE: &str = "div.t-bold > span[aria-hidden='true']";
pub const ENTITY_SUBTITLE: &str =
    "span.t-14.t-normal:not(.t-black--light) > span[aria-hidden='true']";
pub const ENTITY_CAPTION: &str = "span.t-14.t-normal.t-black--light > span[aria-hidden='true']";
pub const ENTITY_LOGO: &str = "img";
pub const ENTITY_BODY: &str = "div.inline-show-more-text span[aria-hidden='true']";

// === 推荐信 ===
pub const RECOMMENDATION_PANEL: &str = "div.artdeco-tabpanel";

// === 搜索结果页 ===
pub const SEARCH_RESULT_ITEM: &str = "li.reusable-search__result-container";
pub const SEARCH_RESULT_LINK: &str = "span.entity-result__title-text a[href]";
pub const SEARCH_RESULT_NAME: &str = "span.entity-result__title-text span[aria-hidden='true']";
pub const SEARCH_RESULT_HEADLINE: &str = "div.entity-result__primary-subtitle";
pub const SEARCH_RESULT_LOCATION: &str = "div.entity-result__secondary-subtitle";
pub const SEARCH_RESULT_PICTURE: &str = "img.presence-entity__image";
pub const SEARCH_NEXT_BUTTON: &str = "button.artdeco-pagination__button--next";

// === 链接发现 ===
pub const ANCHOR: &str = "a[href]";

// === 登录校验 ===
pub const LOGGED_IN_MARKER: &str = "img.global-nav__me-photo";
