use super::Agent;
use crate::game::{Food, Grid, SENSOR_COUNT, Snake};

/// Length of the vector handed to an agent: 8 sensors + 3 food flags
pub const SENSOR_VECTOR_LEN: usize = SENSOR_COUNT + 3;

/// Which single move best closes in on the food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FoodHint {
    pub straight: bool,
    pub left: bool,
    pub right: bool,
}

impl FoodHint {
    const STRAIGHT: FoodHint = FoodHint {
        straight: true,
        left: false,
        right: false,
    };
    const LEFT: FoodHint = FoodHint {
        straight: false,
        left: true,
        right: false,
    };
    const RIGHT: FoodHint = FoodHint {
        straight: false,
        left: false,
        right: true,
    };

    /// Flags in vector order: straight, left, right
    pub fn as_inputs(&self) -> [f32; 3] {
        [self.straight, self.left, self.right].map(|flag| if flag { 1.0 } else { 0.0 })
    }
}

/// Direction hint toward the food, relative to the snake's heading.
///
/// Food off to a side asks for that side. Food in line with the head asks
/// for straight when it is ahead and for right when it is behind. Food on
/// the head cell counts as ahead only when the snake faces Up or Left.
pub fn food_hint(snake: &Snake, food: &Food) -> FoodHint {
    let orientation = snake.orientation();
    let delta = snake.head().delta_to(food.position());
    let lateral = delta.dot(orientation.right());
    let forward = delta.dot(orientation.forward());

    if lateral > 0 {
        FoodHint::RIGHT
    } else if lateral < 0 {
        FoodHint::LEFT
    } else if forward > 0 || (forward == 0 && orientation.faces_origin()) {
        FoodHint::STRAIGHT
    } else {
        FoodHint::RIGHT
    }
}

/// Sensor readings followed by the food hint
pub fn sensor_vector(grid: &Grid, snake: &Snake, food: &Food) -> [f32; SENSOR_VECTOR_LEN] {
    let mut inputs = [0.0; SENSOR_VECTOR_LEN];

    for (slot, reading) in inputs.iter_mut().zip(snake.sense8(grid)) {
        *slot = f32::from(reading);
    }
    inputs[SENSOR_COUNT..].copy_from_slice(&food_hint(snake, food).as_inputs());

    inputs
}

/// Raw agent output for the current state. Picking a command from it is up
/// to the caller.
pub fn decide<A: Agent + ?Sized>(agent: &A, grid: &Grid, snake: &Snake, food: &Food) -> Vec<f32> {
    agent.evaluate(&sensor_vector(grid, snake, food))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Orientation, Position};
    use std::cell::RefCell;

    fn hint(orientation: Orientation, food: (i32, i32)) -> FoodHint {
        let mut grid = Grid::new();
        let snake = Snake::new(Position::new(14, 15), orientation, 6);
        let food = Food::place(&mut grid, food.into());
        food_hint(&snake, &food)
    }

    #[test]
    fn test_food_straight_ahead_facing_right() {
        let hint = hint(Orientation::Right, (20, 15));
        assert_eq!(hint, FoodHint::STRAIGHT);
        assert_eq!(hint.as_inputs(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_food_ahead_every_heading() {
        assert_eq!(hint(Orientation::Up, (14, 3)), FoodHint::STRAIGHT);
        assert_eq!(hint(Orientation::Down, (14, 25)), FoodHint::STRAIGHT);
        assert_eq!(hint(Orientation::Left, (2, 15)), FoodHint::STRAIGHT);
        assert_eq!(hint(Orientation::Right, (27, 15)), FoodHint::STRAIGHT);
    }

    #[test]
    fn test_food_behind_resolves_right() {
        assert_eq!(hint(Orientation::Up, (14, 25)), FoodHint::RIGHT);
        assert_eq!(hint(Orientation::Down, (14, 3)), FoodHint::RIGHT);
        assert_eq!(hint(Orientation::Left, (27, 15)), FoodHint::RIGHT);
        assert_eq!(hint(Orientation::Right, (2, 15)), FoodHint::RIGHT);
    }

    #[test]
    fn test_food_to_the_side() {
        // Screen y grows downward.
        assert_eq!(hint(Orientation::Up, (3, 10)), FoodHint::LEFT);
        assert_eq!(hint(Orientation::Up, (25, 10)), FoodHint::RIGHT);
        assert_eq!(hint(Orientation::Down, (3, 20)), FoodHint::RIGHT);
        assert_eq!(hint(Orientation::Down, (25, 20)), FoodHint::LEFT);
        assert_eq!(hint(Orientation::Left, (10, 3)), FoodHint::RIGHT);
        assert_eq!(hint(Orientation::Left, (10, 25)), FoodHint::LEFT);
        assert_eq!(hint(Orientation::Right, (20, 3)), FoodHint::LEFT);
        assert_eq!(hint(Orientation::Right, (20, 25)), FoodHint::RIGHT);
    }

    #[test]
    fn test_food_on_head_cell() {
        assert_eq!(hint(Orientation::Up, (14, 15)), FoodHint::STRAIGHT);
        assert_eq!(hint(Orientation::Left, (14, 15)), FoodHint::STRAIGHT);
        assert_eq!(hint(Orientation::Down, (14, 15)), FoodHint::RIGHT);
        assert_eq!(hint(Orientation::Right, (14, 15)), FoodHint::RIGHT);
    }

    #[test]
    fn test_exactly_one_flag() {
        for orientation in [
            Orientation::Up,
            Orientation::Down,
            Orientation::Left,
            Orientation::Right,
        ] {
            for x in (0..30).step_by(3) {
                for y in (0..30).step_by(3) {
                    let flags = hint(orientation, (x, y)).as_inputs();
                    assert_eq!(flags.iter().sum::<f32>(), 1.0);
                }
            }
        }
    }

    #[test]
    fn test_sensor_vector_layout() {
        let mut grid = Grid::new();
        let snake = Snake::new(Position::new(14, 15), Orientation::Right, 6);
        snake.mark(&mut grid);
        grid.set(15, 15, Cell::Snake);
        let food = Food::place(&mut grid, Position::new(14, 5));

        let inputs = sensor_vector(&grid, &snake, &food);

        assert_eq!(
            inputs,
            [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_decide_forwards_vector_and_output() {
        struct Recorder(RefCell<Vec<f32>>);

        impl Agent for Recorder {
            fn evaluate(&self, inputs: &[f32]) -> Vec<f32> {
                *self.0.borrow_mut() = inputs.to_vec();
                vec![0.25, 0.5, 0.75]
            }
        }

        let mut grid = Grid::new();
        let snake = Snake::new(Position::new(14, 15), Orientation::Right, 6);
        snake.mark(&mut grid);
        let food = Food::place(&mut grid, Position::new(20, 15));
        let agent = Recorder(RefCell::new(Vec::new()));

        let output = decide(&agent, &grid, &snake, &food);

        assert_eq!(output, vec![0.25, 0.5, 0.75]);
        assert_eq!(
            *agent.0.borrow(),
            vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0]
        );
    }
}
