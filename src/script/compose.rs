//! Intro, body and conclusion text for a script.
//!
//! Template choice is keyed on the article title so the same article always yields the same
//! script.

use crate::article::model::{ArticleRecord, ContentBlock};
use crate::foundation::hash::pick_index;

/// Summaries at or below this many chars are ignored in favour of key points.
pub const MIN_SUMMARY_CHARS: usize = 20;
/// Paragraph blocks qualify as key points within this char range (inclusive).
pub const KEY_POINT_CHARS: std::ops::RangeInclusive<usize> = 20..=200;
/// At most this many key points are kept.
pub const MAX_KEY_POINTS: usize = 3;
/// Paragraphs used when no key point qualified.
pub const MAX_FALLBACK_PARAGRAPHS: usize = 2;
/// Points longer than this are shortened.
pub const MAX_POINT_CHARS: usize = 100;
const POINT_ELLIPSIS: &str = "...";

const SALT_INTRO: u8 = 1;
const SALT_CONCLUSION: u8 = 2;
const SALT_ENGAGEMENT: u8 = 3;

/// Localized phrase set. `{title}` and `{author}` are substituted.
#[derive(Debug)]
pub struct TemplateSet {
    pub intros: [&'static str; 3],
    pub author_sentence: &'static str,
    pub body_lead: &'static str,
    pub body_fallback: &'static str,
    pub conclusions: [&'static str; 3],
    pub engagements: [&'static str; 3],
    /// Caption drawn over the closing segment.
    pub url_caption: &'static str,
}

static EN: TemplateSet = TemplateSet {
    intros: [
        "Hi everyone! Today I'm presenting an interesting article called \"{title}\".",
        "Hey! Let's talk about \"{title}\", an article worth your attention.",
        "Welcome! In this video I'll sum up the article \"{title}\".",
    ],
    author_sentence: "This article was written by {author}.",
    body_lead: "Here's what you need to know: ",
    body_fallback: "This article contains interesting information you can discover by reading the full article.",
    conclusions: [
        "To learn more about \"{title}\", check the link in the description.",
        "If this topic interests you, go read the full article. The link is in the description.",
        "For the detailed walkthrough, click the link in the description to open the full article.",
    ],
    engagements: [
        "Don't forget to like and subscribe for more content like this!",
        "If you enjoyed this video, feel free to share it and subscribe!",
        "Thanks for watching! Subscribe so you don't miss my next shorts!",
    ],
    url_caption: "See link in description",
};

static FR: TemplateSet = TemplateSet {
    intros: [
        "Bonjour à tous ! Aujourd'hui, je vous présente un article intéressant intitulé \"{title}\".",
        "Salut ! Je vais vous parler de \"{title}\", un article qui mérite votre attention.",
        "Bienvenue ! Dans cette vidéo, je vais vous résumer l'article \"{title}\".",
    ],
    author_sentence: "Cet article a été écrit par {author}.",
    body_lead: "Voici ce que vous devez retenir : ",
    body_fallback: "Cet article contient des informations intéressantes que vous pourrez découvrir en lisant l'article complet.",
    conclusions: [
        "Pour en savoir plus sur \"{title}\", consultez le lien dans la description.",
        "Si ce sujet vous intéresse, je vous invite à lire l'article complet. Le lien est dans la description.",
        "Pour un tutoriel détaillé, cliquez sur le lien dans la description pour accéder à l'article complet.",
    ],
    engagements: [
        "N'oubliez pas de liker et de vous abonner pour plus de contenus comme celui-ci !",
        "Si cette vidéo vous a plu, n'hésitez pas à la partager et à vous abonner !",
        "Merci d'avoir regardé ! Abonnez-vous pour ne manquer aucun de mes prochains shorts !",
    ],
    url_caption: "Lien dans la description",
};

impl TemplateSet {
    /// Phrase set for a language tag. Anything that is not French gets English.
    pub fn for_language(language: &str) -> &'static TemplateSet {
        let primary = language
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim();
        if primary.eq_ignore_ascii_case("fr") {
            &FR
        } else {
            &EN
        }
    }
}

/// Opening line plus the author sentence when the author is known.
pub fn compose_intro(article: &ArticleRecord, templates: &TemplateSet) -> String {
    let idx = pick_index(&article.title, SALT_INTRO, templates.intros.len());
    let mut intro = templates.intros[idx].replace("{title}", &article.title);
    if article.has_known_author() {
        intro.push(' ');
        intro.push_str(&templates.author_sentence.replace("{author}", &article.author));
    }
    intro
}

/// Closing line followed by an engagement phrase.
pub fn compose_conclusion(title: &str, templates: &TemplateSet) -> String {
    let idx = pick_index(title, SALT_CONCLUSION, templates.conclusions.len());
    let engagement = pick_index(title, SALT_ENGAGEMENT, templates.engagements.len());
    format!(
        "{} {}",
        templates.conclusions[idx].replace("{title}", title),
        templates.engagements[engagement]
    )
}

/// Pick the narration body from the summary or the article's key points.
pub fn select_body(summary: &str, content: &[ContentBlock], templates: &TemplateSet) -> String {
    if summary.chars().count() > MIN_SUMMARY_CHARS {
        return summary.to_string();
    }

    let points = key_points(content);
    if points.is_empty() {
        return templates.body_fallback.to_string();
    }

    let mut body = templates.body_lead.to_string();
    for point in points {
        body.push_str(&shorten_point(point));
        body.push(' ');
    }
    body.trim().to_string()
}

fn key_points(content: &[ContentBlock]) -> Vec<&str> {
    let mut points = Vec::new();
    for block in content {
        let chars = block.text.chars().count();
        if (block.kind.is_heading() && !block.text.is_empty())
            || (block.kind.is_paragraph() && KEY_POINT_CHARS.contains(&chars))
        {
            points.push(block.text.as_str());
        }
        if points.len() >= MAX_KEY_POINTS {
            return points;
        }
    }

    if points.is_empty() {
        points = content
            .iter()
            .filter(|b| b.kind.is_paragraph() && !b.text.is_empty())
            .take(MAX_FALLBACK_PARAGRAPHS)
            .map(|b| b.text.as_str())
            .collect();
    }
    points
}

/// Points over [`MAX_POINT_CHARS`] keep their first 97 chars plus `"..."`.
pub fn shorten_point(point: &str) -> String {
    if point.chars().count() <= MAX_POINT_CHARS {
        return point.to_string();
    }
    let keep = MAX_POINT_CHARS - POINT_ELLIPSIS.len();
    let mut out: String = point.chars().take(keep).collect();
    out.push_str(POINT_ELLIPSIS);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/script/compose.rs"]
mod tests;
