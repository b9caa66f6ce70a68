use crate::config::{ExtractionRules, Query};
use crate::parsers::html::ChapterParser;

#[cfg(test)]
mod tests {
    use super::*;

    const CHAPTER_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Site name</title></head>
<body>
  <div class="m-title col-md-12"><h1> 第一章 斗罗大陆 </h1></div>
  <div id="content">
    <p>唐三站在山崖边。</p>
    <p><span>风很大。</span></p>
    <p>他笑了。</p>
  </div>
  <div class="pager">
    <a href="/douluodalu/">目录</a>
    <a href="91694.html">下一章</a>
  </div>
</body>
</html>"#;

    #[test]
    fn test_default_rules_on_chapter_page() {
        let parser = ChapterParser::new(&ExtractionRules::default()).unwrap();
        let parsed = parser.parse(CHAPTER_PAGE);

        assert_eq!(parsed.title.as_deref(), Some("第一章 斗罗大陆"));
        assert_eq!(
            parsed.fragments,
            vec!["唐三站在山崖边。", "风很大。", "他笑了。"]
        );
        assert_eq!(parsed.body(), "唐三站在山崖边。\n风很大。\n他笑了。");
        assert_eq!(parsed.next_href.as_deref(), Some("91694.html"));
    }

    #[test]
    fn test_missing_title_and_next() {
        let parser = ChapterParser::new(&ExtractionRules::default()).unwrap();
        let parsed = parser.parse(
            r#"<html><body><div id="content"><p>only text</p></div></body></html>"#,
        );

        assert_eq!(parsed.title, None);
        assert_eq!(parsed.body(), "only text");
        assert_eq!(parsed.next_href, None);
    }

    #[test]
    fn test_blank_matches_are_skipped() {
        let parser = ChapterParser::new(&ExtractionRules::default()).unwrap();
        let parsed = parser.parse(
            r#"<html><body>
              <div class="m-title col-md-12"><h1>   </h1></div>
              <a href="">下一章</a>
            </body></html>"#,
        );

        assert_eq!(parsed.title, None);
        assert!(parsed.fragments.is_empty());
        assert_eq!(parsed.body(), "");
        assert_eq!(parsed.next_href, None);
    }

    #[test]
    fn test_custom_rules() {
        let rules = ExtractionRules {
            title: Query::text("h2.chapter"),
            body: Query::text("article > p"),
            next: Query::attr("a[rel=next]", "href"),
        };
        let parser = ChapterParser::new(&rules).unwrap();
        let parsed = parser.parse(
            r#"<html><body>
              <h2 class="chapter">Chapter 7</h2>
              <article><p>a</p><p>b</p></article>
              <a rel="next" href="https://other.example/8">Onward</a>
            </body></html>"#,
        );

        assert_eq!(parsed.title.as_deref(), Some("Chapter 7"));
        assert_eq!(parsed.body(), "a\nb");
        assert_eq!(parsed.next_href.as_deref(), Some("https://other.example/8"));
    }

    #[test]
    fn test_invalid_rule_fails_to_compile() {
        let rules = ExtractionRules {
            body: Query::text(":::"),
            ..ExtractionRules::default()
        };
        assert!(ChapterParser::new(&rules).is_err());
    }
}
