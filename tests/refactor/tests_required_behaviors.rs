//! Required-behavior validation and transitive attachment.

use eventide::metadata::ProjectMetadata;
use eventide::project::{BehaviorContent, Project};
use eventide::{RefactorError, WholeProjectRefactorer};

use crate::helpers::*;

fn require(project: &mut Project, behavior: &str, required_type: &str) {
    project
        .extension_mut(EXTENSION)
        .and_then(|e| e.behavior_mut(behavior))
        .unwrap()
        .properties
        .insert_new("RequiredBehaviorProperty")
        .set_type("Behavior")
        .add_extra_info(required_type);
}

fn layout_object<'p>(project: &'p mut Project) -> &'p mut eventide::project::Object {
    project
        .layout_mut("LayoutWithBehaviorFunctions")
        .and_then(|l| l.objects.get_object_mut("ObjectWithMyBehavior"))
        .unwrap()
}

#[test]
fn test_no_required_behavior() {
    let platform = dummy_platform();
    let project = project_with_events_functions_extension();
    let registry = ProjectMetadata::new(&platform, &project);

    let problems =
        WholeProjectRefactorer::new(&registry).find_invalid_required_behavior_properties(&project);
    assert!(problems.is_empty());
}

#[test]
fn test_unfilled_required_behavior() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    require(&mut project, BEHAVIOR, PLATFORM_BEHAVIOR_TYPE);
    // Only the layout object carries the behavior
    project
        .object_mut("GlobalObjectWithMyBehavior")
        .unwrap()
        .remove_behavior("MyBehavior");
    let registry = ProjectMetadata::new(&platform, &project);

    let problems =
        WholeProjectRefactorer::new(&registry).find_invalid_required_behavior_properties(&project);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].object.name, "ObjectWithMyBehavior");
    assert_eq!(problems[0].behavior.name, "MyBehavior");
    assert_eq!(problems[0].property_name, "RequiredBehaviorProperty");
    assert_eq!(problems[0].expected_behavior_type, PLATFORM_BEHAVIOR_TYPE);
}

#[test]
fn test_global_objects_are_validated() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    require(&mut project, BEHAVIOR, PLATFORM_BEHAVIOR_TYPE);
    let registry = ProjectMetadata::new(&platform, &project);

    let problems =
        WholeProjectRefactorer::new(&registry).find_invalid_required_behavior_properties(&project);
    let objects: Vec<_> = problems.iter().map(|p| p.object.name.as_str()).collect();
    assert_eq!(objects, ["GlobalObjectWithMyBehavior", "ObjectWithMyBehavior"]);
}

#[test]
fn test_filled_required_behavior() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    require(&mut project, BEHAVIOR, PLATFORM_BEHAVIOR_TYPE);
    project
        .object_mut("GlobalObjectWithMyBehavior")
        .unwrap()
        .remove_behavior("MyBehavior");

    let object = layout_object(&mut project);
    object.add_behavior(BehaviorContent::new("PlatformBehavior", PLATFORM_BEHAVIOR_TYPE));
    object
        .behavior_mut("MyBehavior")
        .unwrap()
        .set_property("RequiredBehaviorProperty", "PlatformBehavior");
    let registry = ProjectMetadata::new(&platform, &project);

    let problems =
        WholeProjectRefactorer::new(&registry).find_invalid_required_behavior_properties(&project);
    assert!(problems.is_empty());
}

#[test]
fn test_wrongly_filled_required_behavior() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    require(&mut project, BEHAVIOR, PLATFORM_BEHAVIOR_TYPE);
    project
        .object_mut("GlobalObjectWithMyBehavior")
        .unwrap()
        .remove_behavior("MyBehavior");

    let object = layout_object(&mut project);
    object.add_behavior(BehaviorContent::new("PlatformBehavior", PLATFORM_BEHAVIOR_TYPE));
    // Names an attached behavior, but of another type
    object
        .behavior_mut("MyBehavior")
        .unwrap()
        .set_property("RequiredBehaviorProperty", "MyBehavior");
    let registry = ProjectMetadata::new(&platform, &project);

    let problems =
        WholeProjectRefactorer::new(&registry).find_invalid_required_behavior_properties(&project);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].expected_behavior_type, PLATFORM_BEHAVIOR_TYPE);
}

#[test]
fn test_add_behavior_and_required_behaviors() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let extension = project.extension_mut(EXTENSION).unwrap();
    extension
        .insert_new_behavior("MyEventsBasedBehaviorB")
        .set_full_name("My events based behavior B")
        .set_description("An events based behavior for test B");
    require(&mut project, BEHAVIOR, "MyEventsExtension::MyEventsBasedBehaviorB");
    require(&mut project, "MyEventsBasedBehaviorB", PLATFORM_BEHAVIOR_TYPE);
    let registry = ProjectMetadata::new(&platform, &project);
    let refactorer = WholeProjectRefactorer::new(&registry);

    let object = layout_object(&mut project);
    object.remove_behavior("MyBehavior");
    refactorer
        .add_behavior_and_required_behaviors(object, BEHAVIOR_TYPE, "MyBehavior")
        .unwrap();

    assert!(object.has_behavior_named("MyBehavior"));
    assert!(object.has_behavior_named("MyEventsBasedBehaviorB"));
    assert!(object.has_behavior_named("PlatformBehavior"));
    assert_eq!(
        object.behavior("MyBehavior").unwrap().property("RequiredBehaviorProperty"),
        Some("MyEventsBasedBehaviorB")
    );
    assert_eq!(
        object
            .behavior("MyEventsBasedBehaviorB")
            .unwrap()
            .property("RequiredBehaviorProperty"),
        Some("PlatformBehavior")
    );

    // Adding it again changes nothing
    refactorer
        .add_behavior_and_required_behaviors(object, BEHAVIOR_TYPE, "MyBehavior")
        .unwrap();
    assert_eq!(object.behaviors().count(), 3);
    // The global object still misses its requirement
    let problems = refactorer.find_invalid_required_behavior_properties(&project);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].object.name, "GlobalObjectWithMyBehavior");
}

#[test]
fn test_add_unknown_behavior() {
    let platform = dummy_platform();
    let mut project = project_with_events_functions_extension();
    let registry = ProjectMetadata::new(&platform, &project);
    let refactorer = WholeProjectRefactorer::new(&registry);

    let object = layout_object(&mut project);
    assert_eq!(
        refactorer.add_behavior_and_required_behaviors(object, "Nope::Nope", "Nope"),
        Err(RefactorError::not_found("behavior type", "Nope::Nope"))
    );
    assert!(!object.has_behavior_named("Nope"));
}
