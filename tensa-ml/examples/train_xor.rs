//! Two-layer perceptron learning XOR with manual backpropagation.
//!
//! Run with:
//! ```sh
//! cargo run --example train_xor
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use tensa_core::Tensor;
use tensa_ml::activations::{Activation, Sigmoid};
use tensa_ml::loss::{Loss, Mse};
use tensa_ml::optim::{Optimizer, Sgd};
use tensa_ml::schedulers::{LrScheduler, StepLr};
use tensa_ml::Result;

const HIDDEN: usize = 4;
const EPOCHS: usize = 5000;

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    // inputs carry a trailing bias column of ones
    let x = Tensor::<f64>::from_vec(
        &[4, 3],
        vec![
            0.0, 0.0, 1.0, //
            0.0, 1.0, 1.0, //
            1.0, 0.0, 1.0, //
            1.0, 1.0, 1.0,
        ],
    )?;
    let y = Tensor::from_vec(&[4, 1], vec![0.0, 1.0, 1.0, 0.0])?;

    let w1 = Tensor::randn(&[3, HIDDEN], 0.0, 0.5, &mut rng)?;
    let w2 = Tensor::randn(&[HIDDEN, 1], 0.0, 0.5, &mut rng)?;
    let mut params = vec![w1, w2];

    let mut opt = Sgd::new(0.5).with_momentum(0.9);
    let base_rate = opt.learning_rate();
    let scheduler = StepLr::new(2000, 0.5);

    for epoch in 0..EPOCHS {
        opt.set_learning_rate(scheduler.rate(epoch, base_rate));

        // forward
        let z1 = x.matmul(&params[0])?;
        let h = Sigmoid.forward(&z1);
        let z2 = h.matmul(&params[1])?;
        let pred = Sigmoid.forward(&z2);

        let loss = Mse.forward(&pred, &y)?;
        if epoch % 500 == 0 {
            println!("epoch {epoch:4}  loss {loss:.6}  lr {:.3}", opt.learning_rate());
        }

        // backward
        let d_pred = Mse.backward(&pred, &y)?;
        let d_z2 = Sigmoid.backward(&z2, &d_pred)?;
        let g_w2 = h.transpose()?.matmul(&d_z2)?;

        let d_h = d_z2.matmul(&params[1].transpose()?)?;
        let d_z1 = Sigmoid.backward(&z1, &d_h)?;
        let g_w1 = x.transpose()?.matmul(&d_z1)?;

        opt.step(&mut params, &[g_w1, g_w2])?;
    }

    let z1 = x.matmul(&params[0])?;
    let h = Sigmoid.forward(&z1);
    let pred = Sigmoid.forward(&h.matmul(&params[1])?);

    println!("\n  a b | xor");
    for i in 0..4 {
        let a = x.get(&[i, 0])?;
        let b = x.get(&[i, 1])?;
        let p = pred.get(&[i, 0])?;
        println!("  {a} {b} | {p:.3}");
    }
    Ok(())
}
