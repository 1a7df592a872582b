//! Integration tests for the full query flow.
//!
//! Tests the complete path: tokens → filter → evaluate → page → cache → page turn.

use std::io::Write;
use std::sync::Arc;

use jucedoc_lib::catalogue::CompoundKind;
use jucedoc_lib::{
    Catalogue, CatalogueBuilder, ChannelId, Filter, FilterError, MessageId, PageAction,
    PageCache, PagedResult, QueryConfig, QueryService, SymbolKind, SymbolSpec, TenantId,
};
use tempfile::NamedTempFile;

/// Structs and classes under `juce::Audio*` and `juce::Gui*`, plus a
/// Component hierarchy for base filtering.
fn create_juce_catalogue() -> Catalogue {
    let mut builder = CatalogueBuilder::new().with_revision("8.0.4");
    let juce = builder.add(SymbolSpec::namespace("juce").brief("JUCE library"));

    builder.add(SymbolSpec::class("juce::AudioBuffer", "class").within(juce));
    builder.add(SymbolSpec::class("juce::AudioSourceChannelInfo", "struct").within(juce));
    builder.add(SymbolSpec::class("juce::AudioPlayHead", "class").within(juce));
    builder.add(SymbolSpec::class("juce::AudioProcessorHolder", "struct").within(juce));
    builder.add(SymbolSpec::class("juce::GuiHelperStruct", "struct").within(juce));
    builder.add(SymbolSpec::class("juce::GuiWindow", "class").within(juce));
    builder.add(SymbolSpec::enumeration("juce::AudioChannelType", true).within(juce));

    let component = builder.add(SymbolSpec::class("juce::Component", "class").within(juce));
    let button = builder.add(
        SymbolSpec::class("juce::Button", "class")
            .within(juce)
            .base(component),
    );
    builder.add(
        SymbolSpec::class("juce::TextButton", "class")
            .within(juce)
            .base(button),
    );

    builder.build()
}

fn qualified_names(catalogue: &Catalogue, result: &PagedResult) -> Vec<String> {
    result
        .matches()
        .iter()
        .map(|m| catalogue.get(m.id).unwrap().qualified_name.clone())
        .collect()
}

#[test]
fn test_audio_structs_only() {
    let catalogue = create_juce_catalogue();
    let filter =
        Filter::parse(["entity:Class,Enum", "ctype:Struct", "cpath:juce::Audio"]).unwrap();

    let mut result = PagedResult::new(ChannelId(1), filter);
    result.apply_query(&catalogue, None);

    let names = qualified_names(&catalogue, &result);
    assert_eq!(
        names,
        vec!["juce::AudioSourceChannelInfo", "juce::AudioProcessorHolder"]
    );
    for m in result.matches() {
        let symbol = catalogue.get(m.id).unwrap();
        assert_eq!(
            symbol.class_detail().unwrap().compound_kind(),
            Some(CompoundKind::Struct)
        );
    }
}

#[test]
fn test_direct_and_nested_bases() {
    let catalogue = create_juce_catalogue();

    let nested = Filter::parse(["entity:Class", "bases:juce::Component", "sort:asc"]).unwrap();
    let mut result = PagedResult::new(ChannelId(1), nested);
    result.apply_query(&catalogue, None);
    assert_eq!(
        qualified_names(&catalogue, &result),
        vec!["juce::Button", "juce::TextButton"]
    );

    let direct = Filter::parse(["entity:Class", "bases:@juce::Component"]).unwrap();
    let mut result = PagedResult::new(ChannelId(1), direct);
    result.apply_query(&catalogue, None);
    assert_eq!(qualified_names(&catalogue, &result), vec!["juce::Button"]);
}

#[test]
fn test_cache_capacity_two_scenario() {
    let mut cache = PageCache::new(2);
    for id in 1..=3 {
        cache.push(MessageId(id), PagedResult::new(ChannelId(1), Filter::default()));
    }

    assert!(cache.get(MessageId(1)).is_none());
    assert!(cache.get(MessageId(2)).is_some());
    assert!(cache.get(MessageId(3)).is_some());
}

#[test]
fn test_zero_matches_single_empty_page() {
    let catalogue = create_juce_catalogue();
    let filter = Filter::parse(["cpath:nowhere::"]).unwrap();
    let mut result = PagedResult::new(ChannelId(1), filter).with_page_size(5);
    result.apply_query(&catalogue, None);

    assert_eq!(result.page_count(), 1);
    assert!(result.render_page().is_empty());
}

#[test]
fn test_malformed_token_rejected() {
    let err = Filter::parse(["entity:Class", "entity=Class"]).unwrap_err();
    assert_eq!(err, FilterError::MalformedToken("entity=Class".to_string()));
}

#[test]
fn test_service_find_and_page_turns() {
    let catalogue = Arc::new(create_juce_catalogue());
    let config = QueryConfig {
        page_size: 2,
        ..QueryConfig::default()
    };
    let service = QueryService::new(catalogue, config);

    let result = service
        .find(ChannelId(7), "audio", &["entity:Class,Enum", "sort:asc"])
        .unwrap();
    assert_eq!(result.item_count(), 5);
    assert_eq!(result.page_count(), 3);

    let first_page: Vec<_> = result
        .resolve_page(service.catalogue())
        .into_iter()
        .map(|(kind, symbol)| (kind, symbol.qualified_name.clone()))
        .collect();
    assert_eq!(
        first_page,
        vec![
            (SymbolKind::Class, "juce::AudioBuffer".to_string()),
            (SymbolKind::Enum, "juce::AudioChannelType".to_string()),
        ]
    );

    let tenant = TenantId(100);
    assert!(service.remember(tenant, MessageId(55), result).unwrap());

    let turn = |action| {
        service
            .turn_page(tenant, MessageId(55), action)
            .unwrap()
            .unwrap()
    };
    assert_eq!(turn(PageAction::Forward).summary.page, 2);
    let last = turn(PageAction::Forward);
    assert_eq!(last.summary.page, 3);
    assert_eq!(last.items.len(), 1);
    assert_eq!(turn(PageAction::Forward).summary.page, 3);
    assert_eq!(turn(PageAction::Back).summary.page, 2);
}

#[test]
fn test_snapshot_file_feeds_service() {
    let catalogue = create_juce_catalogue();
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(catalogue.to_json_string().unwrap().as_bytes())
        .unwrap();

    let loaded = Catalogue::load(file.path()).unwrap();
    assert_eq!(loaded.counts(), catalogue.counts());
    assert_eq!(loaded.revision(), Some("8.0.4"));

    let service = QueryService::new(Arc::new(loaded), QueryConfig::default());
    let (kind, symbol) = service.show("juce::TextButton").unwrap();
    assert_eq!(kind, SymbolKind::Class);
    assert_eq!(symbol.class_detail().unwrap().bases.len(), 1);

    let result = service
        .list(ChannelId(1), &["entity:Class", "bases:@juce::Button"])
        .unwrap();
    assert_eq!(result.item_count(), 1);
}

#[test]
fn test_volatile_members_end_to_end() {
    let mut builder = CatalogueBuilder::new();
    let juce = builder.add(SymbolSpec::namespace("juce"));
    let thread = builder.add(SymbolSpec::class("juce::Thread", "class").within(juce));
    builder.add(
        SymbolSpec::field("juce::Thread::shouldExit")
            .within(thread)
            .volatile(),
    );
    builder.add(
        SymbolSpec::function("juce::Thread::threadShouldExit")
            .within(thread)
            .constant()
            .volatile(),
    );
    builder.add(SymbolSpec::function("juce::Thread::getThreadName").within(thread));
    let catalogue = builder.build();

    let run = |tokens: &[&str]| {
        let mut result = PagedResult::new(ChannelId(1), Filter::parse(tokens).unwrap());
        result.apply_query(&catalogue, None);
        qualified_names(&catalogue, &result)
    };

    assert_eq!(
        run(&["entity:Function,Field", "quals:Volatile"]),
        vec!["juce::Thread::shouldExit"]
    );
    assert_eq!(
        run(&["entity:Function,Field", "quals:ConstVolatile"]),
        vec!["juce::Thread::threadShouldExit"]
    );
    assert_eq!(
        run(&["entity:Function", "quals:Normal,ConstVolatile", "sort:asc"]),
        vec!["juce::Thread::getThreadName", "juce::Thread::threadShouldExit"]
    );
}
