use crate::app::{AppContext, Result};
use crate::session::LookupOutcome;

pub async fn list_chapters(ctx: &AppContext) -> Result<()> {
    let mut nav = ctx.navigator();
    let chapters = nav.load_chapters().await?;

    for chapter in chapters {
        println!(
            "{:>3}  {:<20} {:<28} {:>3} verses  {}",
            chapter.number,
            chapter.english_name,
            chapter.english_name_translation,
            chapter.verse_count,
            chapter.name
        );
    }

    Ok(())
}

pub async fn show_earab(ctx: &AppContext, chapter: u32, verse: u32, open: bool) -> Result<()> {
    let mut nav = ctx.navigator();
    nav.load_chapters().await?;
    nav.select_chapter_number(chapter)?;
    nav.set_verse(verse);

    if let Some(chapter) = nav.selected_chapter() {
        println!("{} : {}", chapter.display_title(), verse);
    }

    let source_url = nav.source_url();
    let analysis = nav.request_analysis().await?;

    if !analysis.title.is_empty() {
        println!("\n{}", analysis.title);
    }
    if analysis.fragments.is_empty() {
        println!("\nNo analysis found on the source page.");
    }
    for fragment in &analysis.fragments {
        println!("\n{}", fragment);
    }

    if let Some(url) = source_url {
        println!("\nSource: {}", url);
        if open {
            if let Err(e) = open::that(url.as_str()) {
                eprintln!("Could not open browser: {}", e);
            }
        }
    }

    Ok(())
}

pub async fn show_translation(ctx: &AppContext, chapter: u32, verse: u32) -> Result<()> {
    let translation = ctx.source.fetch_translation(chapter, verse).await?;

    println!("{}:{}", translation.chapter_number, translation.verse_number);
    for text in [
        &translation.arabic_text,
        &translation.english_text,
        &translation.urdu_text,
    ] {
        if !text.is_empty() {
            println!("\n{}", text);
        }
    }

    Ok(())
}

pub async fn show_sarf(ctx: &AppContext, word: &str) -> Result<()> {
    let mut lookup = ctx.morphology_lookup();

    match lookup.analyze(word).await? {
        LookupOutcome::NoResults => println!("No results for {}", word.trim()),
        LookupOutcome::Found(words) => {
            for w in words {
                println!("{}  [{}]  {}", w.vocalized_form, w.part_of_speech_nice, w.display_gloss());
                println!("  root: {}", w.root);
                if let Some(lemma) = &w.lemma {
                    println!("  lemma: {}", lemma);
                }
                if let Some(measure) = &w.measure {
                    println!("  measure: {}", measure);
                }
            }
        }
    }

    Ok(())
}
