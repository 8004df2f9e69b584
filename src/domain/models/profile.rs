// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 工作经历条目
///
/// 同一公司下的多段职位（晋升）被展平为多个条目，公司名和logo
/// 由提取层提升到每个条目上。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    /// 公司名称
    pub company: String,
    /// 公司logo URL
    pub company_logo_url: String,
    /// 职位名称
    pub title: String,
    /// 雇佣类型（Full-time / Contract 等）
    pub employment_type: String,
    /// 起始日期
    pub start_date: String,
    /// 结束日期（在职时为 "Present"）
    pub end_date: String,
    /// 时长标注
    pub duration: String,
    /// 工作地点
    pub location: String,
    /// 工作模式（Remote / Hybrid / On-site）
    pub work_mode: String,
}

/// 教育经历条目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    /// 学校名称
    pub school: String,
    /// 学校logo URL
    pub school_logo_url: String,
    /// 学位
    pub degree: String,
    /// 专业方向
    pub field_of_study: String,
    /// 起始日期
    pub start_date: String,
    /// 结束日期
    pub end_date: String,
}

/// 项目条目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// 项目名称
    pub name: String,
    /// 起始日期
    pub start_date: String,
    /// 结束日期
    pub end_date: String,
    /// 项目描述
    pub description: String,
}

/// 荣誉奖项条目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Honor {
    /// 奖项名称
    pub title: String,
    /// 颁发机构
    pub issuer: String,
    /// 颁发日期
    pub issue_date: String,
    /// 描述
    pub description: String,
}

/// 一条推荐信
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 推荐人姓名
    pub author: String,
    /// 推荐人头衔/与本人关系
    pub author_headline: String,
    /// 推荐正文
    pub text: String,
}

/// 收到与给出的推荐信
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub received: Vec<Recommendation>,
    pub given: Vec<Recommendation>,
}

/// 档案记录
///
/// 一次完整页面访问后由提取层构建，构建后不可变；
/// `canonical_url`（去掉查询参数的档案URL）是持久化去重键。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// 规范化档案URL（唯一身份键）
    pub canonical_url: String,
    /// 姓名
    pub name: String,
    /// 头衔
    pub headline: String,
    /// 所在地
    pub location: String,
    /// 头像URL
    pub picture_url: String,
    /// 工作经历
    pub experiences: Vec<Experience>,
    /// 教育经历
    pub educations: Vec<Education>,
    /// 项目
    pub projects: Vec<Project>,
    /// 荣誉奖项
    pub honors: Vec<Honor>,
    /// 推荐信
    pub recommendations: Recommendations,
}

impl ProfileRecord {
    /// 用于目标过滤的归属字符串
    ///
    /// 教育经历拼为 "学位 专业 from 学校"，工作经历贡献公司名。
    pub fn affiliation_strings(&self) -> Vec<String> {
        let mut affiliations = Vec::new();

        for edu in &self.educations {
            let mut parts: Vec<&str> = Vec::new();
            if !edu.degree.is_empty() {
                parts.push(&edu.degree);
            }
            if !edu.field_of_study.is_empty() {
                parts.push(&edu.field_of_study);
            }
            let prefix = parts.join(" ");
            let affiliation = if prefix.is_empty() {
                edu.school.clone()
            } else if edu.school.is_empty() {
                prefix
            } else {
                format!("{} from {}", prefix, edu.school)
            };
            if !affiliation.is_empty() {
                affiliations.push(affiliation);
            }
        }

        for exp in &self.experiences {
            if !exp.company.is_empty() {
                affiliations.push(exp.company.clone());
            }
        }

        affiliations
    }
}
