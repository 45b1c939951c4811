use keyfind_core::indexer::index_record;
use keyfind_core::model::{AppRecord, Application, Keyword};
use keyfind_core::search::{rank, score_application, MAX_RESULTS};

fn firefox() -> Application {
    Application {
        id: "/usr/share/applications/firefox.desktop".to_string(),
        name: "Firefox".to_string(),
        generic_name: String::new(),
        comment: String::new(),
        launch_command: "firefox %u".to_string(),
        keywords: vec![
            Keyword::new("firefox", 1000),
            Keyword::new("web", 1),
            Keyword::new("browser", 1),
        ],
        count: 5,
    }
}

fn single_keyword(id: &str, word: &str, weight: u32, position: usize) -> Application {
    let mut keywords: Vec<Keyword> = (0..position).map(|_| Keyword::new("zzz", weight)).collect();
    keywords.push(Keyword::new(word, weight));
    Application {
        id: id.to_string(),
        name: word.to_string(),
        generic_name: String::new(),
        comment: String::new(),
        launch_command: word.to_string(),
        keywords,
        count: 0,
    }
}

#[test]
fn firefox_name_prefix_scores_as_documented() {
    let apps = vec![firefox()];
    let results = rank(&apps, "fire");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].app, 0);
    assert_eq!(results[0].score, 100_000_005);
}

#[test]
fn firefox_detail_keyword_scores_as_documented() {
    let apps = vec![firefox()];
    let results = rank(&apps, "web");
    assert_eq!(results[0].score, 990_005);
}

#[test]
fn reordering_keywords_changes_score() {
    let mut app = firefox();
    app.keywords.swap(1, 2);
    assert_eq!(score_application(&app, "web"), Some(98 * 10_000 + 5));
}

#[test]
fn empty_query_yields_no_results() {
    let apps = vec![firefox(), single_keyword("/b", "bravo", 1000, 0)];
    assert!(rank(&apps, "").is_empty());
}

#[test]
fn ranking_is_deterministic_per_application() {
    let apps: Vec<Application> = ["alpha", "alphabet", "paladin", "salsa", "talc"]
        .iter()
        .enumerate()
        .map(|(i, word)| single_keyword(&format!("/app/{i}"), word, 1000, i % 3))
        .collect();

    let mut first = rank(&apps, "al");
    let mut second = rank(&apps, "al");
    first.sort_by_key(|r| r.app);
    second.sort_by_key(|r| r.app);
    assert_eq!(first, second);
}

#[test]
fn prefix_match_beats_infix_match_at_equal_weight_and_position() {
    for weight in [1, 1000] {
        for position in [0, 1, 7, 42, 99] {
            let apps = vec![
                single_keyword("/infix", "campfire", weight, position),
                single_keyword("/prefix", "firework", weight, position),
            ];
            let results = rank(&apps, "fire");
            assert_eq!(results.len(), 2);
            assert_eq!(results[0].app, 1, "weight={weight} position={position}");
            assert_eq!(results[0].score, results[1].score * 100);
        }
    }
}

#[test]
fn results_are_capped_to_best_ten() {
    let apps: Vec<Application> = (0..25)
        .map(|i| single_keyword(&format!("/app/{i}"), "term", 1, i))
        .collect();

    let results = rank(&apps, "term");
    assert_eq!(results.len(), MAX_RESULTS);

    let mut picked: Vec<usize> = results.iter().map(|r| r.app).collect();
    picked.sort();
    assert_eq!(picked, (0..10).collect::<Vec<_>>());
    assert!(results.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn launch_count_nudges_equal_matches() {
    let apps = vec![
        index_record(AppRecord::new("/a", "Terminal", "", "", "xterm")),
        index_record(AppRecord::new("/b", "Terminal", "", "", "kitty")).with_count(3),
    ];
    let results = rank(&apps, "term");
    assert_eq!(results[0].app, 1);
    assert_eq!(results[0].score - results[1].score, 3);
}

#[test]
fn name_match_outranks_description_match() {
    let apps = vec![
        index_record(AppRecord::new("/a", "Editor", "Text Editor", "Write code", "gedit")),
        index_record(AppRecord::new("/b", "Code", "", "", "code")),
    ];
    let results = rank(&apps, "code");
    assert_eq!(results[0].app, 1);
    assert_eq!(results.len(), 2);
}
