// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 档案页面提取
//!
//! 把一张已渲染的档案页HTML转换为 [`ProfileRecord`]。每个分区
//! 独立提取，容器缺失时返回空集合，单个分区的DOM形态异常不影响
//! 其他分区和整页提取。

use crate::domain::models::profile::{
    Education, Experience, Honor, ProfileRecord, Project, Recommendation, Recommendations,
};
use crate::extraction::selectors;
use crate::extraction::text::{clean_text, parse_date_range, split_delimited};
use scraper::{ElementRef, Html, Selector};

/// 解析常量选择器
fn sel(raw: &str) -> Selector {
    Selector::parse(raw).unwrap()
}

/// 取作用域内第一个匹配元素的清理后文本
fn first_text(scope: ElementRef, raw_sel: &str) -> String {
    scope
        .select(&sel(raw_sel))
        .next()
        .map(|e| clean_text(&e.text().collect::<String>()))
        .unwrap_or_default()
}

/// 取作用域内所有匹配元素的清理后文本
fn texts(scope: ElementRef, raw_sel: &str) -> Vec<String> {
    scope
        .select(&sel(raw_sel))
        .map(|e| clean_text(&e.text().collect::<String>()))
        .collect()
}

/// 取作用域内第一个匹配元素的属性值
fn first_attr(scope: ElementRef, raw_sel: &str, attr: &str) -> String {
    scope
        .select(&sel(raw_sel))
        .next()
        .and_then(|e| e.value().attr(attr))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// 元素是否位于嵌套子列表内部
fn inside_sub_list(el: ElementRef) -> bool {
    el.ancestors().any(|node| {
        node.value().as_element().is_some_and(|e| {
            e.attr("class")
                .is_some_and(|c| c.contains(selectors::SUB_LIST_CLASS))
        })
    })
}

/// 定位分区容器
fn section<'a>(doc: &'a Html, raw_sel: &str) -> Option<ElementRef<'a>> {
    doc.select(&sel(raw_sel)).next()
}

/// 分区内的顶层条目（不含嵌套子列表里的条目）
fn top_items<'a>(scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    scope
        .select(&sel(selectors::ENTITY_ITEM))
        .filter(|li| !inside_sub_list(*li))
        .collect()
}

/// 提取完整档案记录
///
/// `canonical_url` 由调用方提供（已去查询参数），作为记录的唯一身份键。
pub fn extract_profile(html: &str, canonical_url: &str) -> ProfileRecord {
    let doc = Html::parse_document(html);

    ProfileRecord {
        canonical_url: canonical_url.to_string(),
        name: first_text(doc.root_element(), selectors::NAME),
        headline: first_text(doc.root_element(), selectors::HEADLINE),
        location: first_text(doc.root_element(), selectors::LOCATION),
        picture_url: first_attr(doc.root_element(), selectors::PICTURE, "src"),
        experiences: extract_experiences(&doc),
        educations: extract_educations(&doc),
        projects: extract_projects(&doc),
        honors: extract_honors(&doc),
        recommendations: extract_recommendations(&doc),
    }
}

/// 提取工作经历分区
///
/// 条目分两种形态：同一公司多段职位的嵌套条目（公司名/logo提升到
/// 每段职位上），以及单段职位的扁平条目（"公司 · 雇佣类型" 与
/// "地点 · 工作模式" 组合字段各自拆分）。
pub fn extract_experiences(doc: &Html) -> Vec<Experience> {
    let Some(section_el) = section(doc, selectors::EXPERIENCE_SECTION) else {
        return Vec::new();
    };

    let mut experiences = Vec::new();
    for item in top_items(section_el) {
        if let Some(sub_list) = item.select(&sel(selectors::SUB_LIST)).next() {
            // 嵌套条目：顶层是公司，子列表是各段职位
            let company = first_text(item, selectors::ENTITY_TITLE);
            let company_logo_url = first_attr(item, selectors::ENTITY_LOGO, "src");

            for role in sub_list.select(&sel(selectors::ENTITY_ITEM)) {
                let captions = texts(role, selectors::ENTITY_CAPTION);
                let dates = parse_date_range(captions.first().map(String::as_str).unwrap_or(""));
                let (location, work_mode) =
                    split_delimited(captions.get(1).map(String::as_str).unwrap_or(""));

                experiences.push(Experience {
                    company: company.clone(),
                    company_logo_url: company_logo_url.clone(),
                    title: first_text(role, selectors::ENTITY_TITLE),
                    employment_type: first_text(role, selectors::ENTITY_SUBTITLE),
                    start_date: dates.start,
                    end_date: dates.end,
                    duration: dates.duration,
                    location,
                    work_mode,
                });
            }
        } else {
            // 扁平条目：单段职位
            let (company, employment_type) =
                split_delimited(&first_text(item, selectors::ENTITY_SUBTITLE));
            let captions = texts(item, selectors::ENTITY_CAPTION);
            let dates = parse_date_range(captions.first().map(String::as_str).unwrap_or(""));
            let (location, work_mode) =
                split_delimited(captions.get(1).map(String::as_str).unwrap_or(""));

            experiences.push(Experience {
                company,
                company_logo_url: first_attr(item, selectors::ENTITY_LOGO, "src"),
                title: first_text(item, selectors::ENTITY_TITLE),
                employment_type,
                start_date: dates.start,
                end_date: dates.end,
                duration: dates.duration,
                location,
                work_mode,
            });
        }
    }
    experiences
}

/// 提取教育经历分区
pub fn extract_educations(doc: &Html) -> Vec<Education> {
    let Some(section_el) = section(doc, selectors::EDUCATION_SECTION) else {
        return Vec::new();
    };

    top_items(section_el)
        .into_iter()
        .map(|item| {
            let (degree, field_of_study) =
                split_delimited(&first_text(item, selectors::ENTITY_SUBTITLE));
            let captions = texts(item, selectors::ENTITY_CAPTION);
            let dates = parse_date_range(captions.first().map(String::as_str).unwrap_or(""));

            Education {
                school: first_text(item, selectors::ENTITY_TITLE),
                school_logo_url: first_attr(item, selectors::ENTITY_LOGO, "src"),
                degree,
                field_of_study,
                start_date: dates.start,
                end_date: dates.end,
            }
        })
        .collect()
}

/// 提取项目分区
pub fn extract_projects(doc: &Html) -> Vec<Project> {
    let Some(section_el) = section(doc, selectors::PROJECTS_SECTION) else {
        return Vec::new();
    };

    top_items(section_el)
        .into_iter()
        .map(|item| {
            // 项目日期有时在副标题行，有时在浅色标注行
            let mut date_raw = first_text(item, selectors::ENTITY_SUBTITLE);
            if date_raw.is_empty() {
                date_raw = texts(item, selectors::ENTITY_CAPTION)
                    .into_iter()
                    .next()
                    .unwrap_or_default();
            }
            let dates = parse_date_range(&date_raw);

            Project {
                name: first_text(item, selectors::ENTITY_TITLE),
                start_date: dates.start,
                end_date: dates.end,
                description: first_text(item, selectors::ENTITY_BODY),
            }
        })
        .collect()
}

/// 提取荣誉奖项分区
pub fn extract_honors(doc: &Html) -> Vec<Honor> {
    let Some(section_el) = section(doc, selectors::HONORS_SECTION) else {
        return Vec::new();
    };

    top_items(section_el)
        .into_iter()
        .map(|item| {
            // 副标题形如 "Issued by Acme · May 2020"
            let (issuer_raw, issue_date) =
                split_delimited(&first_text(item, selectors::ENTITY_SUBTITLE));
            let issuer = issuer_raw
                .strip_prefix("Issued by ")
                .unwrap_or(&issuer_raw)
                .to_string();

            Honor {
                title: first_text(item, selectors::ENTITY_TITLE),
                issuer,
                issue_date,
                description: first_text(item, selectors::ENTITY_BODY),
            }
        })
        .collect()
}

/// 从推荐信标签页提取条目
fn recommendations_from_panel(panel: ElementRef) -> Vec<Recommendation> {
    panel
        .select(&sel(selectors::ENTITY_ITEM))
        .map(|item| Recommendation {
            author: first_text(item, selectors::ENTITY_TITLE),
            author_headline: first_text(item, selectors::ENTITY_SUBTITLE),
            text: first_text(item, selectors::ENTITY_BODY),
        })
        .filter(|r| !r.author.is_empty() || !r.text.is_empty())
        .collect()
}

/// 提取推荐信分区
///
/// 分区内两个标签页，第一个是收到的推荐，第二个是给出的推荐。
pub fn extract_recommendations(doc: &Html) -> Recommendations {
    let Some(section_el) = section(doc, selectors::RECOMMENDATIONS_SECTION) else {
        return Recommendations::default();
    };

    let panel_sel = sel(selectors::RECOMMENDATION_PANEL);
    let mut panels = section_el.select(&panel_sel);
    let received = panels.next().map(recommendations_from_panel).unwrap_or_default();
    let given = panels.next().map(recommendations_from_panel).unwrap_or_default();

    Recommendations { received, given }
}
