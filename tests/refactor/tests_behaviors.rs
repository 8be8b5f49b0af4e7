//! Events-based behavior renames, behavior function renames and parameter
//! moves, and behavior property renames.

use eventide::metadata::ProjectMetadata;
use eventide::project::{Event, Instruction, ParameterDescriptor, ParameterKind};
use eventide::WholeProjectRefactorer;

use crate::helpers::*;

#[test]
fn test_events_based_behavior_renamed() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let registry = ProjectMetadata::new(&platform, &project);
    let refactorer = WholeProjectRefactorer::new(&registry);

    refactorer.rename_events_based_behavior(
        &mut project,
        EXTENSION,
        BEHAVIOR,
        "MyRenamedEventsBasedBehavior",
    );

    let object = project
        .layout("LayoutWithBehaviorFunctions")
        .and_then(|l| l.objects.get_object("ObjectWithMyBehavior"))
        .unwrap();
    assert_eq!(
        object.behavior("MyBehavior").unwrap().type_name,
        "MyEventsExtension::MyRenamedEventsBasedBehavior"
    );
    assert_eq!(
        project
            .object("GlobalObjectWithMyBehavior")
            .and_then(|o| o.behavior("MyBehavior"))
            .unwrap()
            .type_name,
        "MyEventsExtension::MyRenamedEventsBasedBehavior"
    );

    let events = layout_events(&project, "LayoutWithBehaviorFunctions");
    assert_eq!(
        first_action_type(events, 0),
        "MyEventsExtension::MyRenamedEventsBasedBehavior::MyBehaviorEventsFunction"
    );
    assert_eq!(
        first_action_type(events, 1),
        "MyEventsExtension::MyRenamedEventsBasedBehavior::SetPropertyMyProperty"
    );

    // Calls go through the behavior's instance name
    assert_eq!(
        first_action_first_parameter(
            external_events(&project, "ExternalEventsWithBehaviorFunctions"),
            0,
        ),
        "1 + ObjectWithMyBehavior.MyBehavior::MyBehaviorEventsFunctionExpression(123, 456, 789)"
    );
}

#[test]
fn test_behavior_rename_updates_behavior_parameters() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    project
        .extension_mut(EXTENSION)
        .unwrap()
        .insert_new_function("UsesBehavior")
        .add_parameter(
            ParameterDescriptor::new("Object", ParameterKind::Object)
                .with_extra_info("MyExtension::Sprite"),
        )
        .add_parameter(
            ParameterDescriptor::new("Behavior", ParameterKind::Behavior)
                .with_extra_info(BEHAVIOR_TYPE),
        );
    let registry = ProjectMetadata::new(&platform, &project);

    WholeProjectRefactorer::new(&registry).rename_events_based_behavior(
        &mut project,
        EXTENSION,
        BEHAVIOR,
        "Renamed",
    );

    let function = project
        .extension(EXTENSION)
        .and_then(|e| e.functions.get("UsesBehavior"))
        .unwrap();
    assert_eq!(function.parameters[0].extra_info, "MyExtension::Sprite");
    assert_eq!(function.parameters[1].extra_info, "MyEventsExtension::Renamed");
}

#[test]
fn test_behavior_events_function_renamed() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let registry = ProjectMetadata::new(&platform, &project);
    let refactorer = WholeProjectRefactorer::new(&registry);

    refactorer.rename_behavior_events_function(
        &mut project,
        EXTENSION,
        BEHAVIOR,
        "MyBehaviorEventsFunction",
        "MyRenamedBehaviorEventsFunction",
    );
    refactorer.rename_behavior_events_function(
        &mut project,
        EXTENSION,
        BEHAVIOR,
        "MyBehaviorEventsFunctionExpression",
        "MyRenamedBehaviorEventsFunctionExpression",
    );

    assert_eq!(
        first_action_type(layout_events(&project, "LayoutWithBehaviorFunctions"), 0),
        "MyEventsExtension::MyEventsBasedBehavior::MyRenamedBehaviorEventsFunction"
    );

    let events = external_events(&project, "ExternalEventsWithBehaviorFunctions");
    assert_eq!(
        first_action_first_parameter(events, 0),
        "1 + ObjectWithMyBehavior.MyBehavior::MyRenamedBehaviorEventsFunctionExpression(123, 456, 789)"
    );
    // Swapped qualifiers: an unrelated chain
    assert_eq!(
        first_action_first_parameter(events, 1),
        "2 + ObjectWithMyBehavior::MyBehavior.MyBehaviorEventsFunctionExpression(123, 456, 789)"
    );
    // Referenced without a call
    assert_eq!(
        first_action_first_parameter(events, 2),
        "3 + ObjectWithMyBehavior.MyBehavior::MyRenamedBehaviorEventsFunctionExpression"
    );
    assert_eq!(
        first_action_first_parameter(events, 3),
        "4 + ObjectWithMyBehavior::MyBehavior.MyBehaviorEventsFunctionExpression"
    );
}

#[test]
fn test_behavior_function_rename_checks_behavior_type() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let layout = project.layout_mut("LayoutWithBehaviorFunctions").unwrap();
    layout
        .objects
        .insert_new_object("Other", "MyExtension::Sprite")
        .add_behavior(eventide::project::BehaviorContent::new("MyBehavior", "Another::Behavior"));
    layout.events.insert(
        Event::standard().with_action(
            Instruction::new("MyExtension::DoSomething")
                .with_parameters(["Other.MyBehavior::MyBehaviorEventsFunctionExpression(1, 2, 3)"]),
        ),
    );
    let registry = ProjectMetadata::new(&platform, &project);

    WholeProjectRefactorer::new(&registry).rename_behavior_events_function(
        &mut project,
        EXTENSION,
        BEHAVIOR,
        "MyBehaviorEventsFunctionExpression",
        "Renamed",
    );

    assert_eq!(
        first_action_first_parameter(layout_events(&project, "LayoutWithBehaviorFunctions"), 4),
        "Other.MyBehavior::MyBehaviorEventsFunctionExpression(1, 2, 3)"
    );
}

#[test]
fn test_behavior_events_function_parameter_moved() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let registry = ProjectMetadata::new(&platform, &project);
    let refactorer = WholeProjectRefactorer::new(&registry);

    refactorer
        .move_behavior_events_function_parameter(
            &mut project,
            EXTENSION,
            BEHAVIOR,
            "MyBehaviorEventsFunction",
            0,
            2,
        )
        .unwrap();
    refactorer
        .move_behavior_events_function_parameter(
            &mut project,
            EXTENSION,
            BEHAVIOR,
            "MyBehaviorEventsFunctionExpression",
            0,
            2,
        )
        .unwrap();

    let action = first_action(layout_events(&project, "LayoutWithBehaviorFunctions"), 0);
    assert_eq!(
        action.parameters,
        ["Second parameter", "Third parameter", "First parameter"]
    );

    let events = external_events(&project, "ExternalEventsWithBehaviorFunctions");
    assert_eq!(
        first_action_first_parameter(events, 0),
        "1 + ObjectWithMyBehavior.MyBehavior::MyBehaviorEventsFunctionExpression(456, 789, 123)"
    );
    assert_eq!(
        first_action_first_parameter(events, 1),
        "2 + ObjectWithMyBehavior::MyBehavior.MyBehaviorEventsFunctionExpression(123, 456, 789)"
    );
}

#[test]
fn test_behavior_property_renamed() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let registry = ProjectMetadata::new(&platform, &project);
    let refactorer = WholeProjectRefactorer::new(&registry);

    refactorer.rename_behavior_property(
        &mut project,
        EXTENSION,
        BEHAVIOR,
        "MyProperty",
        "MyRenamedProperty",
    );

    let events = layout_events(&project, "LayoutWithBehaviorFunctions");
    assert_eq!(
        first_action_type(events, 1),
        "MyEventsExtension::MyEventsBasedBehavior::SetPropertyMyRenamedProperty"
    );
    assert_eq!(
        first_condition_type(events, 2),
        "MyEventsExtension::MyEventsBasedBehavior::PropertyMyRenamedProperty"
    );
    assert_eq!(
        first_action_first_parameter(events, 3),
        "ObjectWithMyBehavior.MyBehavior::PropertyMyRenamedProperty()"
    );
}

#[test]
fn test_behavior_property_renamed_inside_behavior_functions() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let behavior = project
        .extension_mut(EXTENSION)
        .and_then(|e| e.behavior_mut(BEHAVIOR))
        .unwrap();
    behavior
        .functions
        .get_mut("MyBehaviorEventsFunction")
        .unwrap()
        .events
        .insert(Event::standard().with_action(
            Instruction::new("MyExtension::DoSomething").with_parameters(["MyProperty * 2"]),
        ));
    project
        .extension_mut(EXTENSION)
        .unwrap()
        .functions
        .get_mut("MyEventsFunction")
        .unwrap()
        .events
        .insert(Event::standard().with_action(
            Instruction::new("MyExtension::DoSomething").with_parameters(["MyProperty * 2"]),
        ));
    let registry = ProjectMetadata::new(&platform, &project);

    WholeProjectRefactorer::new(&registry).rename_behavior_property(
        &mut project,
        EXTENSION,
        BEHAVIOR,
        "MyProperty",
        "Speed",
    );

    let extension = project.extension(EXTENSION).unwrap();
    let inside = &extension
        .behavior(BEHAVIOR)
        .and_then(|b| b.functions.get("MyBehaviorEventsFunction"))
        .unwrap()
        .events;
    assert_eq!(first_action_first_parameter(inside, 0), "Speed * 2");

    // Outside the behavior, a bare identifier is not its property
    let outside = &extension.functions.get("MyEventsFunction").unwrap().events;
    assert_eq!(first_action_first_parameter(outside, 0), "MyProperty * 2");
}

/// A behavior function whose name starts like a property getter.
fn project_with_property_like_method() -> eventide::project::Project {
    let mut project = project_with_events_functions_extension();
    project
        .extension_mut(EXTENSION)
        .and_then(|e| e.behavior_mut(BEHAVIOR))
        .unwrap()
        .functions
        .insert_new("PropertyCount")
        .add_parameter(ParameterDescriptor::new("a", ParameterKind::Number))
        .add_parameter(ParameterDescriptor::new("b", ParameterKind::Number));
    let events = &mut project.layout_mut("LayoutWithBehaviorFunctions").unwrap().events;
    for expression in [
        "ObjectWithMyBehavior.MyBehavior::PropertyCount(1, 2)",
        // Shares the prefix only
        "ObjectWithMyBehavior.MyBehavior::PropertyCountMax(1, 2)",
    ] {
        events.insert(Event::standard().with_action(
            Instruction::new("MyExtension::DoSomething").with_parameters([expression]),
        ));
    }
    project
}

#[test]
fn test_behavior_function_named_like_property_getter_renamed() {
    let platform = dummy_platform();
    let mut project = project_with_property_like_method();
    let registry = ProjectMetadata::new(&platform, &project);

    WholeProjectRefactorer::new(&registry).rename_behavior_events_function(
        &mut project,
        EXTENSION,
        BEHAVIOR,
        "PropertyCount",
        "ResetAll",
    );

    let events = layout_events(&project, "LayoutWithBehaviorFunctions");
    assert_eq!(
        first_action_first_parameter(events, 4),
        "ObjectWithMyBehavior.MyBehavior::ResetAll(1, 2)"
    );
    assert_eq!(
        first_action_first_parameter(events, 5),
        "ObjectWithMyBehavior.MyBehavior::PropertyCountMax(1, 2)"
    );
}

#[test]
fn test_behavior_function_named_like_property_getter_parameter_moved() {
    let platform = dummy_platform();
    let mut project = project_with_property_like_method();
    let registry = ProjectMetadata::new(&platform, &project);

    WholeProjectRefactorer::new(&registry)
        .move_behavior_events_function_parameter(
            &mut project,
            EXTENSION,
            BEHAVIOR,
            "PropertyCount",
            0,
            1,
        )
        .unwrap();

    let events = layout_events(&project, "LayoutWithBehaviorFunctions");
    assert_eq!(
        first_action_first_parameter(events, 4),
        "ObjectWithMyBehavior.MyBehavior::PropertyCount(2, 1)"
    );
    assert_eq!(
        first_action_first_parameter(events, 5),
        "ObjectWithMyBehavior.MyBehavior::PropertyCountMax(1, 2)"
    );
}
