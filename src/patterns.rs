//! Pattern sources and compiled regexes for title classification and selector handling.
//!
//! The classification tables here are the *sources* of the default
//! [`ClassificationRuleset`](crate::ClassificationRuleset); the ruleset compiles
//! them once and owns the results. Patterns that are not part of the ruleset
//! (selector normalization, CSS identifiers) are compiled once at first use
//! with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Title Classification Sources
// =============================================================================

/// Job-related keywords. Matched as case-sensitive substrings by the classifier
/// and case-insensitively by the scoring ranker.
pub const JOB_KEYWORDS: &[&str] = &[
    "개발자", "엔지니어", "디자이너", "기획자", "매니저", "PM", "팀장", "전문가", "담당자",
    "developer", "engineer", "designer", "manager", "planner", "lead", "specialist", "analyst",
    // Job functions
    "개발", "사업", "R&D", "연구", "기술", "데이터", "보안", "AI", "인공지능", "클라우드",
    "마케팅", "영업", "운영", "인사", "재무", "법무", "UX", "UI", "품질", "QA",
    "컨설팅", "솔루션", "서비스", "플랫폼", "시스템", "네트워크", "인프라",
    // Hiring vocabulary
    "채용", "인턴", "체험형", "수시채용", "신입", "경력", "정규직", "계약직",
    "BM", "디자인", "생산직", "충포장", "NEOPHARM",
];

/// Function + role shape, e.g. "백엔드 개발자", "UI/UX 디자이너". Case-sensitive.
pub const TITLE_SHAPE: &str = r"(백엔드|프론트엔드|풀스택|모바일|웹|UI/UX|그래픽|브랜드|마케팅|데이터|AI|ML|DevOps|QA|기획|운영|영업|HR|재무|법무|개발자|디자이너|엔지니어|매니저|기획자|사이언티스트)";

/// Short bare role names that carry no keyword ("Barista", "매장 스태프").
pub const SHORT_ROLE: &str = r"^[가-힣a-zA-Z&\s]+$";

/// Bare company, group, legal-entity and business-unit names.
pub const COMPANY_NAME_PATTERNS: &[&str] = &[
    r"^(건설기계|HD현대\w*|HD\w+|현대\w*|삼성\w*|LG\w*|SK\w*|포스코\w*|롯데\w*|한화\w*|KT\w*|네이버\w*|카카오\w*|우아한\w*|배달의민족\w*|쿠팡\w*|토스\w*)$",
    r"^(\w+그룹|\w+홀딩스|\w+계열|\w+그룹사|\w+지주)$",
    r"^(\w+\s*주식회사|\w+\s*\(주\)|\w+\s*inc\.?|\w+\s*corp\.?|\w+\s*co\.?|\w+\s*ltd\.?)$",
    r"^(\w+오일뱅크|\w+텍|\w+솔루션|\w+시스템|\w+엔지니어링|\w+소프트|\w+테크|\w+랩|\w+스튜디오)$",
];

/// Dates, countdowns, hash-tags and bare short Hangul words.
pub const DATE_OR_TAG_PATTERNS: &[&str] = &[
    r"^\d{4}\.\d{2}\.\d{2}\s+\d{2}:\d{2}.*$",
    r"^D-\d+.*$",
    r"^D-DAY$",
    r"^#[^#]+(\s+외\s*\d+)?$",
    r"^[가-힣]+\s*등$",
    r"^[가-힣]{2,6}$",
    r"^\d+\s*외\s*\d+$",
];

/// Site chrome: social links, buttons, menus, filter chips, benefits, footer text.
pub const UI_CHROME_PATTERNS: &[&str] = &[
    r"(blog|youtube|facebook|instagram|twitter|linkedin)",
    r"(바로가기|more|view|link|copy|share|공유)",
    r"(faq|q&a|notice|contact|about|문의|공지)",
    r"^(talent|careers?|culture|people)$",
    // Filter chips and process pages
    r"^경력\s*\d+",
    r"^신입$",
    r"^인턴$",
    r"\d+년\s*이상",
    r"\d+년\s*이하",
    r"채용\s*프로세스",
    r"지원\s*방법",
    r"복리후생",
    r"기타\s*사항",
    r"관계사\s*선택",
    r"전체\s*선택",
    r"초기화",
    r"닫기",
    r"^(경력\s*\d+.*년|신입|인턴|정규직|계약직|인재풀)$",
    // Menu items
    r"^(채용\s*FAQ|지원서\s*작성|마이페이지|공지사항|홍보영상|CEO\s*메시지|채용\s*Q&A|지원서\s*수정|인재상|경영이념|인재육성|복리후생)$",
    // Benefits
    r"^(자율\s*복장|점심시간|연차|간식|건강검진|동호회|인센티브|시차출퇴근|임신기|맛있는|1시간|8시~10시).*$",
    // Department and category labels on their own
    r"^(DESIGN|SALES|PRODUCT|STORE|STAFF|GLOBAL|CX|SCM|OFF-SALES|CEO\s*STAFF)$",
    r"^(Tech|마케팅/홍보|경영지원|디자인|콘텐츠\s*비즈니스)$",
    r"^\-$",
    r"^(경력\s*무관|경력\s*\d+~\d+년|경력\s*\d+년\s*이상|베리시.*스토어)$",
    // Footer
    r"^(개인정보\s*처리방침|이용약관|저작권|All\s*Rights\s*Reserved|Copyright).*$",
    // Navigation
    r"^(사이트맵|Contact\s*Us|고객센터|문의|안내)$",
    r"^(#[가-힣]+|#[가-힣]+\([^)]+\)|#ICT|#연구|#영업|#설계|#생산직|#대산|#분당).*$",
    r"^(.*\s*바로가기\s*≫?)$",
    r"^(채용정보|직무소개|복리후생|기업문화|회사소개|오시는길|Contact|문의하기)\s*(바로가기)?.*$",
];

/// Bare team and department names, rejected even when a keyword matched.
pub const TEAM_NAME_PATTERNS: &[&str] = &[r"^[가-힣]+팀$", r"^[가-힣]+본부$", r"^[가-힣]+부문$"];

/// Strong posting shapes; any match adds the title bonus to the weight.
pub const WEIGHT_TITLE_PATTERNS: &[&str] = &[
    r"(개발자|엔지니어|디자이너|기획자|매니저|전문가|담당자|팀장|부장|대리|과장|주임)",
    r"(백엔드|프론트엔드|풀스택|모바일|웹|UI/UX|DevOps|QA)",
    r"(시니어|주니어|신입|경력).*채용",
    r"(프로덕트|서비스|비즈니스|콘텐츠).*\s+(기획|개발|운영)",
    r"채용.*\s+(전형|공고)",
    r"\s+(인턴|체험형)",
];

/// Bracketed company prefix, e.g. "[NEOPHARM] 연구원".
pub const WEIGHT_BRACKETED: &str = r"\[.*\]";

/// Recruiting year, e.g. "2025년".
pub const WEIGHT_YEAR: &str = r"20\d{2}년";

/// Organisation-unit words that make a title more concrete.
pub const WEIGHT_ORG_UNITS: &[&str] = &["팀", "센터", "본부", "사업부"];

// =============================================================================
// Document Structure Tables
// =============================================================================

/// Id/class fragments that mark a job list container.
pub const CONTAINER_HINTS: &[&str] = &[
    "job", "recruit", "career", "position", "opening", "notice", "list", "bbs",
];

/// Ancestor tags or class/id tokens whose descendants are never candidates.
pub const ANCESTOR_BLACKLIST: &[&str] = &[
    "nav", "footer", "header", "menu", "sitemap", "aside", "sidebar", "breadcrumb",
];

/// Tags scanned by the unscoped candidate pass.
pub const CANDIDATE_TAGS: &[&str] = &[
    "p", "div", "span", "a", "strong", "h2", "h3", "h4", "li", "dt", "td",
];

/// Text-bearing descendants used to deepen a repeated child selector.
pub const COMPOUND_TAGS: &[&str] = &["p", "strong", "h2", "h3", "h4", "div"];

/// Known boilerplate selectors (footers, company-name lists).
pub const SELECTOR_BLACKLIST: &[&str] = &[
    "div.ViewFooterLink_link-text__yC2ls",
    "p.official__apply__company__title",
    "footer",
    "nav",
    ".footer",
    ".navbar",
    ".breadcrumb",
    ".copyright",
    ".privacy",
    ".terms",
];

/// Single-hop selectors too broad to identify a posting list.
pub const GENERIC_SELECTORS: &[&str] = &[
    "a[href]", "a", "div > a", "li > a", "td > a", "p > a", "tr > td", "ul > li", "div > p",
    "li", "td", "dt",
];

/// Selectors verified on real career pages, used to seed a shared cache.
pub const SEED_SELECTORS: &[&str] = &[
    "a div.sc-9b56f69e-0.jlntFl",
    "div.JobPostingsJobPosting__Layout-sc-6ae888f2-0.ffnSOB div.JobPostingsJobPosting__Bottom-sc-6ae888f2-5.iXrIoX",
    "#jobList > div.jobList_info > div > a > span.title",
    "div.RecruitList_left__5MzDR div.RecruitList_title-wrapper__Gvh1r p",
    "div.swiper-slide button p",
];

/// Framework root markers of client-rendered pages, lowercase.
pub const SPA_FINGERPRINTS: &[&str] = &[
    "__next", "buildid", "__next_data__", // Next.js
    "reactroot", "react-root", // React
    "__vue__", "__nuxt__", // Vue/Nuxt
    "ng-app", "ng-version", // Angular
];

// =============================================================================
// Selector Normalization Patterns
// =============================================================================

/// Matches a compound that is only a UUID-shaped id.
pub static UUID_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("UUID_ID regex")
});

/// Matches positional pseudo-classes with a numeric index.
pub static POSITIONAL_PSEUDO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":nth-(?:child|of-type)\(\s*\d+\s*\)").expect("POSITIONAL_PSEUDO regex")
});

/// Matches a plain CSS identifier that needs no escaping.
pub static CSS_IDENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").expect("CSS_IDENT regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_all(patterns: &[&str]) {
        for pattern in patterns {
            assert!(Regex::new(pattern).is_ok(), "pattern should compile: {pattern}");
        }
    }

    #[test]
    fn classification_sources_compile() {
        compile_all(COMPANY_NAME_PATTERNS);
        compile_all(DATE_OR_TAG_PATTERNS);
        compile_all(UI_CHROME_PATTERNS);
        compile_all(TEAM_NAME_PATTERNS);
        compile_all(WEIGHT_TITLE_PATTERNS);
        compile_all(&[TITLE_SHAPE, SHORT_ROLE, WEIGHT_BRACKETED, WEIGHT_YEAR]);
    }

    #[test]
    fn uuid_id_matches_only_bare_uuid_ids() {
        assert!(UUID_ID.is_match("#a1b2c3d4-e5f6-47a8-89bc-0123456789ab"));
        assert!(!UUID_ID.is_match("#jobList"));
        assert!(!UUID_ID.is_match("#a1b2c3d4-e5f6-47a8-89bc-0123456789ab.item"));
    }

    #[test]
    fn positional_pseudo_matches_indexed_forms() {
        assert!(POSITIONAL_PSEUDO.is_match("li:nth-child(3)"));
        assert!(POSITIONAL_PSEUDO.is_match("li:nth-of-type( 12 )"));
        assert!(!POSITIONAL_PSEUDO.is_match("li:nth-child(odd)"));
    }

    #[test]
    fn css_ident_rejects_escaped_forms() {
        assert!(CSS_IDENT.is_match("job-title"));
        assert!(CSS_IDENT.is_match("RecruitList_left__5MzDR"));
        assert!(!CSS_IDENT.is_match("md:flex"));
        assert!(!CSS_IDENT.is_match("3col"));
        assert!(!CSS_IDENT.is_match("w-1/2"));
    }
}
