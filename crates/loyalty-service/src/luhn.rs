//! Luhn 校验
//!
//! 订单号在发起任何网络调用之前先做格式校验：
//! 必须是非空十进制数字串且通过 Luhn 校验和。

/// 校验订单号格式与 Luhn 校验和
pub fn is_valid(number: &str) -> bool {
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = number
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let mut digit = u32::from(b - b'0');
            if i % 2 == 1 {
                digit *= 2;
                if digit > 9 {
                    digit -= 9;
                }
            }
            digit
        })
        .sum();

    sum % 10 == 0
}
