//! Object and group removal and renaming.

use eventide::metadata::ProjectMetadata;
use eventide::project::{
    Event, EventKind, InitialInstance, Instruction, ParameterDescriptor, ParameterKind, Project,
};
use eventide::WholeProjectRefactorer;

use crate::helpers::*;

fn project_with_layout_group() -> Project {
    let mut project = Project::new("Project");
    let layout = project.insert_new_layout("Layout1");
    let group = layout.objects.groups.insert_new("Group1");
    for object in ["Object1", "Object2", "NotExistingObject", "GlobalObject1"] {
        group.add_object(object);
    }
    layout.objects.insert_new_object("Object1", "MyExtension::Sprite");
    layout.objects.insert_new_object("Object2", "MyExtension::Sprite");
    project
}

fn project_with_instances() -> Project {
    let mut project = Project::new("Project");
    for layout in ["Layout1", "Layout2"] {
        project.insert_new_layout(layout);
    }
    let layout = project.layout_mut("Layout1").unwrap();
    layout.objects.insert_new_object("Object1", "MyExtension::Sprite");
    layout.objects.insert_new_object("Object2", "MyExtension::Sprite");
    for object in ["Object1", "Object2", "GlobalObject1"] {
        layout.instances.insert(InitialInstance::new(object));
    }

    for (name, associated) in [("ExternalLayout1", "Layout1"), ("ExternalLayout2", "Layout2")] {
        let external = project.insert_new_external_layout(name);
        external.set_associated_layout(associated);
        for object in ["Object1", "Object2", "GlobalObject1"] {
            external.instances.insert(InitialInstance::new(object));
        }
    }
    project
}

fn do_something(expression: &str) -> Event {
    Event::standard()
        .with_action(Instruction::new("MyExtension::DoSomething").with_parameters([expression]))
}

// ============================================================================
// REMOVAL
// ============================================================================

#[test]
fn test_object_removed_from_groups() {
    let platform = dummy_platform();
    let mut project = project_with_layout_group();
    let refactorer = WholeProjectRefactorer::new(&platform);

    refactorer
        .object_or_group_removed_in_layout(&mut project, "Layout1", "Object1", false)
        .unwrap();
    refactorer.global_object_or_group_removed(&mut project, "GlobalObject1", false);

    let group = &project.layout("Layout1").unwrap().objects.groups[0];
    assert!(!group.find("Object1"));
    assert!(group.find("Object2"));
    assert!(group.find("NotExistingObject"));
    assert!(!group.find("GlobalObject1"));
}

#[test]
fn test_object_removed_from_initial_instances() {
    let platform = dummy_platform();
    let mut project = project_with_instances();
    let refactorer = WholeProjectRefactorer::new(&platform);

    refactorer
        .object_or_group_removed_in_layout(&mut project, "Layout1", "Object1", false)
        .unwrap();
    refactorer.global_object_or_group_removed(&mut project, "GlobalObject1", false);

    let instances = &project.layout("Layout1").unwrap().instances;
    assert!(!instances.has_instances_of("Object1"));
    assert!(instances.has_instances_of("Object2"));
    assert!(!instances.has_instances_of("GlobalObject1"));

    let external1 = &project.external_layout("ExternalLayout1").unwrap().instances;
    assert!(!external1.has_instances_of("Object1"));
    assert!(external1.has_instances_of("Object2"));
    assert!(!external1.has_instances_of("GlobalObject1"));

    // Associated with another layout
    let external2 = &project.external_layout("ExternalLayout2").unwrap().instances;
    assert!(external2.has_instances_of("Object1"));
    assert!(external2.has_instances_of("Object2"));
    assert!(!external2.has_instances_of("GlobalObject1"));
}

#[test]
fn test_group_removal_leaves_groups_untouched() {
    let platform = dummy_platform();
    let mut project = project_with_layout_group();
    let refactorer = WholeProjectRefactorer::new(&platform);

    refactorer
        .object_or_group_removed_in_layout(&mut project, "Layout1", "Object1", true)
        .unwrap();
    assert!(project.layout("Layout1").unwrap().objects.groups[0].find("Object1"));
}

#[test]
fn test_removal_in_unknown_layout() {
    let platform = dummy_platform();
    let mut project = project_with_layout_group();
    let refactorer = WholeProjectRefactorer::new(&platform);

    let result = refactorer.object_or_group_removed_in_layout(
        &mut project,
        "Nowhere",
        "Object1",
        false,
    );
    assert_eq!(
        result,
        Err(eventide::RefactorError::not_found("layout", "Nowhere"))
    );
}

// ============================================================================
// RENAMING
// ============================================================================

#[test]
fn test_object_renamed_in_groups() {
    let platform = dummy_platform();
    let mut project = project_with_layout_group();
    let refactorer = WholeProjectRefactorer::new(&platform);

    refactorer
        .object_or_group_renamed_in_layout(&mut project, "Layout1", "Object1", "Object3", false)
        .unwrap();
    refactorer.global_object_or_group_renamed(
        &mut project,
        "GlobalObject1",
        "GlobalObject3",
        false,
    );

    let group = &project.layout("Layout1").unwrap().objects.groups[0];
    assert!(!group.find("Object1"));
    assert!(group.find("Object2"));
    assert!(group.find("Object3"));
    assert!(!group.find("GlobalObject1"));
    assert!(group.find("GlobalObject3"));
}

#[test]
fn test_object_renamed_in_initial_instances() {
    let platform = dummy_platform();
    let mut project = project_with_instances();
    let refactorer = WholeProjectRefactorer::new(&platform);

    refactorer
        .object_or_group_renamed_in_layout(&mut project, "Layout1", "Object1", "Object3", false)
        .unwrap();
    refactorer.global_object_or_group_renamed(
        &mut project,
        "GlobalObject1",
        "GlobalObject3",
        false,
    );

    let instances = &project.layout("Layout1").unwrap().instances;
    assert!(!instances.has_instances_of("Object1"));
    assert!(instances.has_instances_of("Object3"));
    assert!(!instances.has_instances_of("GlobalObject1"));
    assert!(instances.has_instances_of("GlobalObject3"));

    let external1 = &project.external_layout("ExternalLayout1").unwrap().instances;
    assert!(!external1.has_instances_of("Object1"));
    assert!(external1.has_instances_of("Object2"));
    assert!(external1.has_instances_of("Object3"));
    assert!(!external1.has_instances_of("GlobalObject1"));
    assert!(external1.has_instances_of("GlobalObject3"));

    let external2 = &project.external_layout("ExternalLayout2").unwrap().instances;
    assert!(external2.has_instances_of("Object1"));
    assert!(external2.has_instances_of("Object2"));
    assert!(!external2.has_instances_of("Object3"));
    assert!(!external2.has_instances_of("GlobalObject1"));
    assert!(external2.has_instances_of("GlobalObject3"));
}

#[test]
fn test_object_renamed_in_layout_events() {
    let platform = dummy_platform();
    let mut project = Project::new("Project");
    for name in ["Layout1", "Layout2"] {
        let layout = project.insert_new_layout(name);
        layout.objects.insert_new_object("Object1", "MyExtension::Sprite");
        layout.events.insert(do_something("Object1.X() + Object1.MyBehavior::Speed(Object1.Y())"));
        layout
            .events
            .insert(Event::with_kind(EventKind::ForEach {
                object: "Object1".to_string(),
            }));
    }
    project
        .insert_new_external_events("External1")
        .set_associated_layout("Layout1");
    project
        .external_events_mut("External1")
        .unwrap()
        .events
        .insert(do_something("Object1.Z()"));

    let refactorer = WholeProjectRefactorer::new(&platform);
    refactorer
        .object_or_group_renamed_in_layout(&mut project, "Layout1", "Object1", "Object3", false)
        .unwrap();

    let events = layout_events(&project, "Layout1");
    assert_eq!(
        first_action_first_parameter(events, 0),
        "Object3.X() + Object3.MyBehavior::Speed(Object3.Y())"
    );
    assert_eq!(
        events.get(1).unwrap().kind,
        EventKind::ForEach {
            object: "Object3".to_string()
        }
    );
    assert_eq!(
        first_action_first_parameter(external_events(&project, "External1"), 0),
        "Object3.Z()"
    );

    // Another layout's object with the same name
    let events = layout_events(&project, "Layout2");
    assert_eq!(
        first_action_first_parameter(events, 0),
        "Object1.X() + Object1.MyBehavior::Speed(Object1.Y())"
    );
}

#[test]
fn test_global_rename_skips_shadowing_layouts() {
    let platform = dummy_platform();
    let mut project = Project::new("Project");
    project.insert_new_object("Hero", "MyExtension::Sprite");
    project.objects.groups.insert_new("Everyone").add_object("Hero");

    let plain = project.insert_new_layout("Plain");
    plain.events.insert(do_something("Hero.X()"));
    plain.instances.insert(InitialInstance::new("Hero"));

    let shadowing = project.insert_new_layout("Shadowing");
    shadowing.objects.insert_new_object("Hero", "MyExtension::Sprite");
    shadowing.events.insert(do_something("Hero.X()"));
    shadowing.instances.insert(InitialInstance::new("Hero"));

    project
        .insert_new_external_events("Loose")
        .events
        .insert(do_something("Hero.Y()"));
    let shadowed = project.insert_new_external_events("Shadowed");
    shadowed.set_associated_layout("Shadowing");
    shadowed.events.insert(do_something("Hero.Y()"));

    let refactorer = WholeProjectRefactorer::new(&platform);
    refactorer.global_object_or_group_renamed(&mut project, "Hero", "Player", false);

    assert!(project.objects.groups.get("Everyone").unwrap().find("Player"));
    assert_eq!(first_action_first_parameter(layout_events(&project, "Plain"), 0), "Player.X()");
    assert!(project.layout("Plain").unwrap().instances.has_instances_of("Player"));
    assert_eq!(first_action_first_parameter(external_events(&project, "Loose"), 0), "Player.Y()");

    assert_eq!(first_action_first_parameter(layout_events(&project, "Shadowing"), 0), "Hero.X()");
    assert!(project.layout("Shadowing").unwrap().instances.has_instances_of("Hero"));
    assert_eq!(first_action_first_parameter(external_events(&project, "Shadowed"), 0), "Hero.Y()");
}

#[test]
fn test_variables_and_strings_are_not_objects() {
    let platform = dummy_platform();
    let mut project = Project::new("Project");
    let layout = project.insert_new_layout("Layout1");
    layout.objects.insert_new_object("Object1", "MyExtension::Sprite");
    layout
        .events
        .insert(do_something("Object1.X() + Other.Object1() + StrLen(\"Object1.X()\")"));

    let refactorer = WholeProjectRefactorer::new(&platform);
    refactorer
        .object_or_group_renamed_in_layout(&mut project, "Layout1", "Object1", "Object3", false)
        .unwrap();
    assert_eq!(
        first_action_first_parameter(layout_events(&project, "Layout1"), 0),
        "Object3.X() + Other.Object1() + StrLen(\"Object1.X()\")"
    );
}

// ============================================================================
// EVENTS FUNCTIONS
// ============================================================================

#[test]
fn test_object_renamed_in_events_function() {
    let platform = dummy_platform();
    let mut project = Project::new("Project");
    let function = project
        .insert_new_extension("MyEventsExtension")
        .insert_new_function("MyEventsFunction");
    let group = function.object_groups.insert_new("MyGroup");
    group.add_object("Object1");
    group.add_object("Object2");

    let refactorer = WholeProjectRefactorer::new(&platform);
    let function = project
        .extension_mut("MyEventsExtension")
        .and_then(|e| e.functions.get_mut("MyEventsFunction"))
        .unwrap();
    refactorer.object_or_group_renamed_in_events_function(
        function,
        None,
        "Object1",
        "RenamedObject1",
        false,
    );

    let group = function.object_groups.get("MyGroup").unwrap();
    assert!(!group.find("Object1"));
    assert!(group.find("RenamedObject1"));
    assert!(group.find("Object2"));
}

#[test]
fn test_object_removed_in_events_function() {
    let platform = dummy_platform();
    let mut project = Project::new("Project");
    let function = project
        .insert_new_extension("MyEventsExtension")
        .insert_new_function("MyEventsFunction");
    let group = function.object_groups.insert_new("MyGroup");
    group.add_object("Object1");
    group.add_object("Object2");

    let refactorer = WholeProjectRefactorer::new(&platform);
    let function = project
        .extension_mut("MyEventsExtension")
        .and_then(|e| e.functions.get_mut("MyEventsFunction"))
        .unwrap();
    refactorer.object_or_group_removed_in_events_function(function, "Object1", false);

    let group = function.object_groups.get("MyGroup").unwrap();
    assert!(!group.find("Object1"));
    assert!(group.find("Object2"));
}

#[test]
fn test_object_parameter_renamed_in_function_events() {
    let platform = dummy_platform();
    let mut project = Project::new("Project");
    let function = project
        .insert_new_extension("MyEventsExtension")
        .insert_new_function("MyEventsFunction");
    function.add_parameter(ParameterDescriptor::new("Target", ParameterKind::Object));
    function.events.insert(do_something("Target.X() + Target.Y()"));
    let registry = ProjectMetadata::new(&platform, &project);

    let refactorer = WholeProjectRefactorer::new(&registry);
    let function = project
        .extension_mut("MyEventsExtension")
        .and_then(|e| e.functions.get_mut("MyEventsFunction"))
        .unwrap();
    refactorer.object_or_group_renamed_in_events_function(
        function,
        None,
        "Target",
        "Victim",
        false,
    );

    assert_eq!(
        first_action_first_parameter(&function.events, 0),
        "Victim.X() + Victim.Y()"
    );
}
