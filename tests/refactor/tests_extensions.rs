//! Extension renames and free events-function renames and parameter moves.

use eventide::metadata::ProjectMetadata;
use eventide::{RefactorError, WholeProjectRefactorer};

use crate::helpers::*;

#[test]
fn test_events_extension_renamed() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let registry = ProjectMetadata::new(&platform, &project);
    let refactorer = WholeProjectRefactorer::new(&registry);

    refactorer.rename_events_functions_extension(&mut project, EXTENSION, "MyRenamedExtension");

    // Instructions
    assert_eq!(
        first_action_type(layout_events(&project, "LayoutWithFreeFunctions"), 0),
        "MyRenamedExtension::MyEventsFunction"
    );
    // Expressions
    assert_eq!(
        first_action_first_parameter(
            external_events(&project, "ExternalEventsWithFreeFunctions"),
            0,
        ),
        "1 + MyRenamedExtension::MyEventsFunctionExpression(123, 456)"
    );

    // Behavior types change, behavior names do not
    let object = project
        .layout("LayoutWithBehaviorFunctions")
        .and_then(|l| l.objects.get_object("ObjectWithMyBehavior"))
        .unwrap();
    assert_eq!(
        object.behavior("MyBehavior").unwrap().type_name,
        "MyRenamedExtension::MyEventsBasedBehavior"
    );
    assert_eq!(
        project
            .object("GlobalObjectWithMyBehavior")
            .and_then(|o| o.behavior("MyBehavior"))
            .unwrap()
            .type_name,
        "MyRenamedExtension::MyEventsBasedBehavior"
    );

    let events = layout_events(&project, "LayoutWithBehaviorFunctions");
    assert_eq!(
        first_action_type(events, 0),
        "MyRenamedExtension::MyEventsBasedBehavior::MyBehaviorEventsFunction"
    );
    assert_eq!(
        first_action_type(events, 1),
        "MyRenamedExtension::MyEventsBasedBehavior::SetPropertyMyProperty"
    );

    // Behavior methods called through objects do not spell the extension
    let events = external_events(&project, "ExternalEventsWithBehaviorFunctions");
    assert_eq!(
        first_action_first_parameter(events, 0),
        "1 + ObjectWithMyBehavior.MyBehavior::MyBehaviorEventsFunctionExpression(123, 456, 789)"
    );
    assert_eq!(
        first_action_first_parameter(events, 2),
        "3 + ObjectWithMyBehavior.MyBehavior::MyBehaviorEventsFunctionExpression"
    );
}

#[test]
fn test_extension_rename_updates_required_behavior_types() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let behavior = project
        .extension_mut(EXTENSION)
        .and_then(|e| e.behavior_mut(BEHAVIOR))
        .unwrap();
    behavior
        .properties
        .insert_new("Needs")
        .set_type("Behavior")
        .add_extra_info(BEHAVIOR_TYPE);
    let registry = ProjectMetadata::new(&platform, &project);

    WholeProjectRefactorer::new(&registry).rename_events_functions_extension(
        &mut project,
        EXTENSION,
        "MyRenamedExtension",
    );

    let behavior = project
        .extension(EXTENSION)
        .and_then(|e| e.behavior(BEHAVIOR))
        .unwrap();
    assert_eq!(
        behavior.properties.get("Needs").unwrap().extra_info,
        ["MyRenamedExtension::MyEventsBasedBehavior"]
    );
}

#[test]
fn test_free_events_function_renamed() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let registry = ProjectMetadata::new(&platform, &project);
    let refactorer = WholeProjectRefactorer::new(&registry);

    refactorer.rename_events_function(
        &mut project,
        EXTENSION,
        "MyEventsFunction",
        "MyRenamedEventsFunction",
    );
    refactorer.rename_events_function(
        &mut project,
        EXTENSION,
        "MyEventsFunctionExpression",
        "MyRenamedFunctionExpression",
    );

    assert_eq!(
        first_action_type(layout_events(&project, "LayoutWithFreeFunctions"), 0),
        "MyEventsExtension::MyRenamedEventsFunction"
    );
    assert_eq!(
        first_action_first_parameter(
            external_events(&project, "ExternalEventsWithFreeFunctions"),
            0,
        ),
        "1 + MyEventsExtension::MyRenamedFunctionExpression(123, 456)"
    );
}

#[test]
fn test_free_events_function_parameter_moved() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let registry = ProjectMetadata::new(&platform, &project);
    let refactorer = WholeProjectRefactorer::new(&registry);

    refactorer
        .move_events_function_parameter(&mut project, EXTENSION, "MyEventsFunction", 0, 2)
        .unwrap();
    refactorer
        .move_events_function_parameter(&mut project, EXTENSION, "MyEventsFunctionExpression", 0, 1)
        .unwrap();

    let action = first_action(layout_events(&project, "LayoutWithFreeFunctions"), 0);
    assert_eq!(
        action.parameters,
        ["Second parameter", "Third parameter", "First parameter"]
    );
    assert_eq!(
        first_action_first_parameter(
            external_events(&project, "ExternalEventsWithFreeFunctions"),
            0,
        ),
        "1 + MyEventsExtension::MyEventsFunctionExpression(456, 123)"
    );
}

#[test]
fn test_parameter_move_out_of_range() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let registry = ProjectMetadata::new(&platform, &project);
    let refactorer = WholeProjectRefactorer::new(&registry);

    assert_eq!(
        refactorer.move_events_function_parameter(
            &mut project,
            EXTENSION,
            "MyEventsFunctionExpression",
            0,
            2,
        ),
        Err(RefactorError::InvalidParameterIndex {
            function: "MyEventsExtension::MyEventsFunctionExpression".to_string(),
            index: 2,
            count: 2,
        })
    );
    assert_eq!(
        refactorer.move_events_function_parameter(&mut project, EXTENSION, "Missing", 0, 1),
        Err(RefactorError::not_found("events function", "MyEventsExtension::Missing"))
    );
    // Nothing moved
    assert_eq!(
        first_action_first_parameter(
            external_events(&project, "ExternalEventsWithFreeFunctions"),
            0,
        ),
        "1 + MyEventsExtension::MyEventsFunctionExpression(123, 456)"
    );
}
