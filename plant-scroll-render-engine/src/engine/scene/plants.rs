use crate::engine::assets::scene_config::SceneConfig;
use crate::engine::loading::model_loader::PlantModel;
use bevy::prelude::*;

/// Parent of the flower, pitched by scroll progress.
#[derive(Component)]
pub struct PlantsGroup;

/// glTF scene root, turned around Y by scroll progress.
#[derive(Component)]
pub struct Flower;

pub fn spawn_plants(mut commands: Commands, config: Res<SceneConfig>, model: Res<PlantModel>) {
    commands
        .spawn((
            Name::new("plants"),
            Transform::default(),
            Visibility::default(),
            PlantsGroup,
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("flower"),
                SceneRoot(model.scene.clone()),
                Transform::from_xyz(0.0, config.model.flower_offset_y, 0.0),
                Flower,
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flower_hangs_below_the_group() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(SceneConfig::default())
            .insert_resource(PlantModel {
                scene: Handle::default(),
                clip: Handle::default(),
            })
            .add_systems(Update, spawn_plants);

        app.update();

        let world = app.world_mut();
        let (flower_parent, flower_transform) = world
            .query_filtered::<(&ChildOf, &Transform), With<Flower>>()
            .single(world)
            .map(|(child_of, transform)| (child_of.parent(), *transform))
            .unwrap();
        let group = world
            .query_filtered::<Entity, With<PlantsGroup>>()
            .single(world)
            .unwrap();

        assert_eq!(flower_parent, group);
        assert_eq!(flower_transform.translation, Vec3::new(0.0, -1.0, 0.0));
    }
}
