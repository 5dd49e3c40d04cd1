//! End-to-end console session against a small host object graph.
//!
//! Mirrors what a console front-end does: look up a root binding, walk
//! members, index containers, call methods and print previews.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::rc::Rc;

use pretty_assertions::assert_eq;
use tether_rt::{
    arg, ErrorCode, HostList, HostMap, MapKey, Param, ParamType, Raw, Runtime, RuntimeConfig, TypeInfo,
    Value,
};

struct Player {
    name: String,
    health: i64,
    inventory: HostMap,
    waypoints: HostList,
}

#[derive(Default)]
struct Camera {
    zoom: f64,
}

fn player_type() -> Rc<TypeInfo> {
    TypeInfo::builder::<Player>("Player")
        .property("name", |p: &Player| p.name.clone())
        .property_rw("health", |p: &Player| p.health, |p: &mut Player, v: i64| p.health = v)
        .property("inventory", |p: &Player| p.inventory.clone())
        .property("waypoints", |p: &Player| p.waypoints.clone())
        .method("heal", vec![], ParamType::Int, |p, _| {
            p.health = 100;
            Ok(Raw::Int(p.health))
        })
        .method("heal", vec![Param::of::<i64>("amount")], ParamType::Int, |p, args| {
            p.health = (p.health + arg::<i64>(args, 0)?).min(100);
            Ok(Raw::Int(p.health))
        })
        .method(
            "give",
            vec![
                Param::of::<String>("item"),
                Param::with_default("count", ParamType::Int, 1_i64),
            ],
            ParamType::Void,
            |p, args| {
                let item: String = arg(args, 0)?;
                let count: i64 = arg(args, 1)?;
                let key = MapKey::Str(item.into());
                let have = p.inventory.get(&key).and_then(|raw| raw.as_int()).unwrap_or(0);
                p.inventory.insert(key, Raw::Int(have + count));
                Ok(Raw::Null)
            },
        )
        .display(|p| format!("Player({}, {} hp)", p.name, p.health))
        .build()
        .expect("player catalog builds")
}

fn camera_type() -> Rc<TypeInfo> {
    TypeInfo::builder::<Camera>("Camera")
        .field("zoom", |c: &Camera| c.zoom, |c: &mut Camera, v: f64| c.zoom = v)
        .static_property("max_zoom", || 4.0_f64)
        .constructor(vec![Param::of::<f64>("zoom")], |args| Ok(Camera { zoom: arg(args, 0)? }))
        .default_constructible()
        .build()
        .expect("camera catalog builds")
}

fn session() -> Runtime {
    let mut rt = Runtime::with_config(RuntimeConfig::default().with_tracing(true));
    let player_ty = player_type();
    rt.register_type(Rc::clone(&player_ty)).expect("player registers");
    rt.register_type(camera_type()).expect("camera registers");

    let inventory = HostMap::from_pairs([("sword".to_string(), 1_i64), ("potion".to_string(), 3)]);
    let waypoints = HostList::from_vec((0..12_i64).map(|i| i * 5).collect());
    let player = player_ty
        .instance(Player {
            name: "ada".to_string(),
            health: 40,
            inventory,
            waypoints,
        })
        .expect("player instance");
    rt.bind("player", player);
    rt
}

#[test]
fn inspect_player() {
    let rt = session();
    let player = rt.lookup("player");
    assert_eq!(rt.format(&player), "Player(ada, 40 hp)");
    assert_eq!(rt.get_member(&player, "name"), Value::string("ada"));
    assert_eq!(player.type_name(), "Player");
}

#[test]
fn heal_overloads() {
    let rt = session();
    let player = rt.lookup("player");
    let heal = rt.get_member(&player, "heal");
    assert_eq!(rt.format(&heal), "<method Player.heal (2 overloads)>");
    assert_eq!(rt.invoke(&heal, &[Value::int(30)]), (Value::int(70), ErrorCode::Success));
    assert_eq!(rt.invoke(&heal, &[Value::float(45.0)]), (Value::int(100), ErrorCode::Success));
    assert_eq!(rt.invoke(&heal, &[]), (Value::int(100), ErrorCode::Success));
    let (_, code) = rt.invoke(&heal, &[Value::int(1), Value::int(2)]);
    assert_eq!(code, ErrorCode::InvalidArgumentCount);
}

#[test]
fn inventory_through_member_and_index() {
    let rt = session();
    let player = rt.lookup("player");
    let inventory = rt.get_member(&player, "inventory");
    assert_eq!(rt.format(&inventory), "{\"sword\": 1, \"potion\": 3}");
    assert_eq!(rt.get_at(&inventory, &Value::string("potion")), Value::int(3));

    let give = rt.get_member(&player, "give");
    assert_eq!(rt.invoke(&give, &[Value::string("potion")]), (Value::VOID, ErrorCode::Success));
    assert_eq!(rt.invoke(&give, &[Value::string("arrow"), Value::int(20)]).1, ErrorCode::Success);
    assert_eq!(rt.get_at(&inventory, &Value::string("potion")), Value::int(4));
    assert_eq!(rt.get_at(&inventory, &Value::string("arrow")), Value::int(20));

    assert!(rt.set_at(&inventory, &Value::string("sword"), &Value::int(2)));
    let again = rt.get_member(&player, "inventory");
    assert_eq!(rt.get_at(&again, &Value::string("sword")), Value::int(2));
    assert_eq!(
        rt.get_at(&again, &Value::string("shield")).error_code(),
        ErrorCode::MemberNotFound
    );
}

#[test]
fn waypoints_preview_and_bounds() {
    let rt = session();
    let player = rt.lookup("player");
    let waypoints = rt.get_member(&player, "waypoints");
    assert_eq!(
        rt.format(&waypoints),
        "[0, 5, 10, 15, 20, 25, 30, 35, 40, 45, ...] (12 total)"
    );
    assert_eq!(rt.get_at(&waypoints, &Value::int(11)), Value::int(55));
    assert_eq!(
        rt.get_at(&waypoints, &Value::int(12)).error_code(),
        ErrorCode::IndexOutOfRange
    );
    let count = rt.get_member(&waypoints, "count");
    assert_eq!(count, Value::int(12));
}

#[test]
fn camera_statics_and_construction() {
    let rt = session();
    let camera_ty = rt.lookup("Camera");
    assert_eq!(rt.get_member(&camera_ty, "max_zoom"), Value::float(4.0));
    assert_eq!(rt.get_member(&camera_ty, "zoom").error_code(), ErrorCode::MemberNotFound);

    let (camera, code) = rt.invoke(&camera_ty, &[Value::int(2)]);
    assert_eq!(code, ErrorCode::Success);
    assert_eq!(rt.get_member(&camera, "zoom"), Value::float(2.0));
    assert!(rt.set_member(&camera, "zoom", &Value::string("1.5")));
    assert_eq!(rt.format(&rt.get_member(&camera, "zoom")), "1.5");
    assert_eq!(rt.format(&camera), "<Camera>");
}

#[test]
fn arithmetic_on_members() {
    let rt = session();
    let player = rt.lookup("player");
    let health = rt.get_member(&player, "health");
    let doubled = rt.binary("*", &health, &Value::int(2));
    assert_eq!(doubled, Value::int(80));
    assert!(rt.set_member(&player, "health", &doubled));
    let ratio = rt.binary("/", &rt.get_member(&player, "health"), &Value::float(100.0));
    assert_eq!(rt.format(&ratio), "0.8");
    assert_eq!(
        rt.binary("/", &health, &Value::int(0)).error_code(),
        ErrorCode::DivideByZero
    );
}

#[test]
fn completion_for_console_input() {
    let rt = session();
    let player = rt.lookup("player");
    assert_eq!(rt.complete(Some(&player), "h"), vec!["heal", "health"]);
    assert_eq!(rt.complete(None, "p"), vec!["player"]);
    assert_eq!(rt.complete(None, "C"), vec!["Camera"]);
}
